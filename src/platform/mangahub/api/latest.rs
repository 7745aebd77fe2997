use serde::Deserialize;

use super::search::Row;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(in crate::platform::mangahub) struct Data {
    pub latest_popular: Option<Vec<Row>>,
}
