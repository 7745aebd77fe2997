use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Debug)]
pub(in crate::platform::mangahub) struct Data {
    pub chapter: Option<Chapter>,
}

#[derive(Deserialize, Debug)]
pub(in crate::platform::mangahub) struct Chapter {
    /// A JSON-encoded string of the page list. Some mirrors send it already decoded.
    pub pages: Option<Value>,
    pub manga: Option<ChapterManga>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(in crate::platform::mangahub) struct ChapterManga {
    pub is_webtoon: Option<bool>,
}

/// Shapes the decoded `pages` string comes in.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub(in crate::platform::mangahub) enum Pages {
    /// `["red-storm_123/1/1.jpg", ...]`
    Paths(Vec<String>),
    /// `{"p": "red-storm_123/1/", "i": ["1.jpg", ...]}`
    Prefixed { p: String, i: Vec<String> },
}

impl Pages {
    /// Relative page paths in reading order.
    pub fn into_paths(self) -> Vec<String> {
        match self {
            Self::Paths(paths) => paths,
            Self::Prefixed { p, i } => {
                let prefix = p.trim_end_matches('/');
                i.into_iter()
                    .map(|file| {
                        if prefix.is_empty() {
                            file
                        } else {
                            format!("{prefix}/{}", file.trim_start_matches('/'))
                        }
                    })
                    .collect()
            }
        }
    }
}
