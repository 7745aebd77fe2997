use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub(in crate::platform::mangahub) struct Data {
    pub search: Option<Search>,
}

#[derive(Deserialize, Debug)]
pub(in crate::platform::mangahub) struct Search {
    pub rows: Option<Vec<Row>>,
    pub count: Option<u32>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(in crate::platform::mangahub) struct Row {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub image: Option<String>,
    #[serde(default, deserialize_with = "crate::stdx::serde::f64_from_number_or_string")]
    pub latest_chapter: Option<f64>,
}
