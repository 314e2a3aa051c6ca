use std::{fs, path::Path};

use serde::Deserialize;

use super::error::{Result, ThumbnailError};

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResultRow {
    pub id: String,
    pub thumbnail_link: String,
}

#[derive(Deserialize)]
struct SearchResponseLinks {
    thumbnail: String,
}

#[derive(Deserialize)]
struct SearchResponseFeature {
    id: String,
    #[serde(rename = "_links")]
    links: SearchResponseLinks,
}

/// Accepted layouts of a search results file: a plain list of rows, or the feature collection
/// returned by the imagery search API.
#[derive(Deserialize)]
#[serde(untagged)]
enum SearchResultsFile {
    Rows(Vec<SearchResultRow>),
    SearchResponse { features: Vec<SearchResponseFeature> },
}

/// Rows of an imagery search, read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResultTable {
    rows: Vec<SearchResultRow>,
}

impl SearchResultTable {
    pub fn new(rows: Vec<SearchResultRow>) -> Self {
        Self { rows }
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let results: SearchResultsFile = serde_json::from_str(contents)
            .map_err(|err| ThumbnailError::ResultTable(err.to_string()))?;
        let rows = match results {
            SearchResultsFile::Rows(rows) => rows,
            SearchResultsFile::SearchResponse { features } => features
                .into_iter()
                .map(|feature| SearchResultRow {
                    id: feature.id,
                    thumbnail_link: feature.links.thumbnail,
                })
                .collect(),
        };
        Ok(Self { rows })
    }

    pub fn from_json_file(filepath: &Path) -> Result<Self> {
        let contents = fs::read_to_string(filepath)?;
        Self::from_json_str(&contents)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&SearchResultRow> {
        self.rows.get(index)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use testdir::testdir;

    use super::{SearchResultRow, SearchResultTable};
    use crate::thumbnail::ThumbnailError;

    #[test]
    fn test_from_json_rows() {
        let table = SearchResultTable::from_json_str(
            r#"[
                {"id": "20230101_101010_00_2405", "thumbnail_link": "https://tiles.example.com/a/thumb"},
                {"id": "20230102_101010_00_2405", "thumbnail_link": "https://tiles.example.com/b/thumb", "cloud_cover": 0.1}
            ]"#,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.row(1),
            Some(&SearchResultRow {
                id: "20230102_101010_00_2405".to_string(),
                thumbnail_link: "https://tiles.example.com/b/thumb".to_string(),
            })
        );
        assert_eq!(table.row(2), None);
    }

    #[test]
    fn test_from_json_search_response() {
        let test_dir = testdir!();
        let filepath = test_dir.join("results.json");
        fs::write(
            &filepath,
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "id": "scene_1",
                    "_links": {"_self": "https://api.example.com/scene_1", "thumbnail": "https://tiles.example.com/scene_1/thumb"},
                    "properties": {"item_type": "PSScene"}
                }]
            }"#,
        )
        .unwrap();

        let table = SearchResultTable::from_json_file(&filepath).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.row(0).unwrap().id, "scene_1");
        assert_eq!(
            table.row(0).unwrap().thumbnail_link,
            "https://tiles.example.com/scene_1/thumb"
        );
    }

    #[test]
    fn test_from_json_missing_columns() {
        let result = SearchResultTable::from_json_str(r#"[{"id": "scene_1"}]"#);
        assert!(matches!(result, Err(ThumbnailError::ResultTable(_))));
    }
}
