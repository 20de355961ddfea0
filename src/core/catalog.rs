use crate::core::level::{parse_level, LevelFormatError};
use crate::core::Level;

pub const BUILTIN_LEVELS: &str = include_str!("../../assets/levels.txt");

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Level {0} does not exist")]
    OutOfRange(usize),
    #[error("Level {index} is malformed: {source}")]
    Format {
        index: usize,
        #[source]
        source: LevelFormatError,
    },
}

/// Level texts separated by a blank line. Each level is parsed on demand so a
/// fresh session always starts from the untouched level.
#[derive(Clone, Debug)]
pub struct LevelCatalog {
    levels: Vec<String>,
}

impl LevelCatalog {
    pub fn parse(text: &str) -> Self {
        let normalized = text.replace("\r\n", "\n");
        let levels = normalized
            .trim()
            .split("\n\n")
            .map(str::to_string)
            .collect();
        LevelCatalog { levels }
    }

    pub fn builtin() -> Self {
        Self::parse(BUILTIN_LEVELS)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, index: usize) -> Result<Level, CatalogError> {
        let text = self.levels.get(index).ok_or(CatalogError::OutOfRange(index))?;
        parse_level(text).map_err(|source| CatalogError::Format { index, source })
    }
}
