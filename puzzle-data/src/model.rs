use serde::{Deserialize, Deserializer, Serialize};

/// The data of a generated word search puzzle.
///
/// Non-optional fields default to their empty value when the payload omits
/// them or sends `null`; `html`, `image` and `solution_image` become `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WordSearchResult {
    #[serde(deserialize_with = "null_default")]
    pub grid: Grid,
    #[serde(deserialize_with = "null_default")]
    pub words: Vec<PlacedWord>,
    #[serde(deserialize_with = "null_default")]
    pub word_count: i64,
    #[serde(deserialize_with = "null_default")]
    pub size: i64,
    #[serde(deserialize_with = "null_default")]
    pub difficulty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution_image: Option<ImageRef>,
}

impl WordSearchResult {
    /// Mismatches between the declared counts and the actual shapes.
    ///
    /// Decoding never enforces these; callers decide whether they matter.
    pub fn consistency_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if usize::try_from(self.word_count).ok() != Some(self.words.len()) {
            issues.push(format!(
                "wordCount is {} but {} words were placed",
                self.word_count,
                self.words.len()
            ));
        }

        let size = usize::try_from(self.size).ok();
        if Some(self.grid.row_count()) != size {
            issues.push(format!(
                "size is {} but the grid has {} rows",
                self.size,
                self.grid.row_count()
            ));
        }
        if let Some(idx) = self.grid.rows().iter().position(|row| Some(row.len()) != size) {
            issues.push(format!(
                "size is {} but grid row {} has {} columns",
                self.size,
                idx,
                self.grid.rows()[idx].len()
            ));
        }

        for placed in &self.words {
            if self.grid.cell(placed.start.row, placed.start.col).is_none() {
                issues.push(format!(
                    "{} starts at ({}, {}), outside the grid",
                    placed.word, placed.start.row, placed.start.col
                ));
            }
        }

        issues
    }
}

/// The puzzle board, row-major.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid(pub Vec<Vec<String>>);

impl Grid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self(rows)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.0
    }

    pub fn row_count(&self) -> usize {
        self.0.len()
    }

    /// Width of the widest row.
    pub fn column_count(&self) -> usize {
        self.0.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, row: i64, col: i64) -> Option<&str> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        self.0.get(row)?.get(col).map(String::as_str)
    }

    pub fn is_square(&self) -> bool {
        let n = self.row_count();
        self.0.iter().all(|row| row.len() == n)
    }
}

/// A word hidden in the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacedWord {
    #[serde(deserialize_with = "null_default")]
    pub word: String,
    #[serde(deserialize_with = "null_default")]
    pub start: Position,
    /// Server vocabulary, e.g. "horizontal". Passed through untouched.
    #[serde(deserialize_with = "null_default")]
    pub direction: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    #[serde(deserialize_with = "null_default")]
    pub row: i64,
    #[serde(deserialize_with = "null_default")]
    pub col: i64,
}

impl Position {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }
}

/// A rendered image of the puzzle hosted by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageRef {
    #[serde(deserialize_with = "null_default")]
    pub image_name: String,
    #[serde(deserialize_with = "null_default")]
    pub format: String,
    #[serde(rename = "downloadURL", deserialize_with = "null_default")]
    pub download_url: String,
    /// Expiry marker, unit defined by the server.
    #[serde(deserialize_with = "null_default")]
    pub expires: i64,
}

/// Reads `null` as the type's empty value.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
