use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub(in crate::platform::mangahub) struct Data {
    pub manga: Option<Manga>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(in crate::platform::mangahub) struct Manga {
    pub title: Option<String>,
    pub status: Option<String>,
    pub image: Option<String>,
    #[serde(default, deserialize_with = "crate::stdx::serde::f64_from_number_or_string")]
    pub latest_chapter: Option<f64>,
    pub author: Option<String>,
    pub artist: Option<String>,
    /// Comma separated, e.g. `"Action, Drama"`.
    pub genres: Option<String>,
    pub description: Option<String>,
    pub alternative_title: Option<String>,
    pub is_yaoi: Option<bool>,
    pub is_porn: Option<bool>,
    pub is_soft_porn: Option<bool>,
    pub updated_date: Option<String>,
    pub chapters: Option<Vec<Chapter>>,
}

#[derive(Deserialize, Debug)]
pub(in crate::platform::mangahub) struct Chapter {
    #[serde(default, deserialize_with = "crate::stdx::serde::f64_from_number_or_string")]
    pub number: Option<f64>,
    pub title: Option<String>,
    pub date: Option<String>,
}
