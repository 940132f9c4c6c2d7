use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog loading and filtering failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown filter token: {0:?}")]
    UnknownFilter(String),
}

/// The two grape categories the catalog knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrapeType {
    Red,
    White,
}

impl GrapeType {
    pub const ALL: [GrapeType; 2] = [GrapeType::Red, GrapeType::White];

    pub fn token(self) -> &'static str {
        match self {
            GrapeType::Red => "red",
            GrapeType::White => "white",
        }
    }

    /// Capitalized label shown in the detail panel.
    pub fn label(self) -> String {
        let token = self.token();
        let mut chars = token.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Preview texture drawn on the ball.
    pub fn preview_image(self) -> &'static str {
        match self {
            GrapeType::Red => "./images/red.png",
            GrapeType::White => "./images/white.png",
        }
    }

    /// Base emissive tint of the ball material.
    pub fn emissive_hex(self) -> u32 {
        match self {
            GrapeType::Red => 0xff6b6b,
            GrapeType::White => 0xf8f9fa,
        }
    }

    /// Colour installed while the ball is selected.
    pub fn highlight_hex(self) -> u32 {
        match self {
            GrapeType::Red => 0xff4444,
            GrapeType::White => 0xffffff,
        }
    }
}

impl fmt::Display for GrapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One record of the catalog document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(rename = "type")]
    pub kind: GrapeType,
    pub name: String,
    pub origin: String,
    pub additional_information: String,
    pub image: String,
}

/// Parse the catalog document: a JSON array of records, order preserved.
pub fn parse_catalog(json: &str) -> Result<Vec<CatalogItem>, CatalogError> {
    Ok(serde_json::from_str(json)?)
}

/// Which records are turned into balls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Only(GrapeType),
}

impl Filter {
    #[inline]
    pub fn matches(&self, item: &CatalogItem) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(kind) => item.kind == *kind,
        }
    }

    pub fn apply<'a>(&self, items: &'a [CatalogItem]) -> Vec<&'a CatalogItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

impl FromStr for Filter {
    type Err = CatalogError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "all" => Ok(Filter::All),
            "red" => Ok(Filter::Only(GrapeType::Red)),
            "white" => Ok(Filter::Only(GrapeType::White)),
            other => Err(CatalogError::UnknownFilter(other.to_string())),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Only(kind) => kind.fmt(f),
        }
    }
}

/// What the detail panel shows for one item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalContent {
    pub image: String,
    pub info_html: String,
}

impl ModalContent {
    pub fn for_item(item: &CatalogItem) -> Self {
        let line = |label: &str, value: &str| {
            format!(
                "<div class=\"modal-info-line\"><strong>{}:</strong> {}</div>",
                label,
                escape_html(value)
            )
        };
        let info_html = [
            line("Grape name", &item.name),
            line("Type", &item.kind.label()),
            line("Origin", &item.origin),
            line("About", &item.additional_information),
        ]
        .join("<br>");
        Self {
            image: item.image.clone(),
            info_html,
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
