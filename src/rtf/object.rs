//! Embedded OLE objects (`\object` groups).

/// How the object is embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectKind {
    /// `\objemb`
    #[default]
    Embedded,
    /// `\objlink`
    Link,
    /// `\objautlink`
    AutoLink,
    /// `\objsub`
    Subscriber,
    /// `\objpub`
    Publisher,
    /// `\objicemb`
    IconEmbedded,
    /// `\objhtml`
    Html,
    /// `\objocx`
    Control,
}

impl ObjectKind {
    /// Map an object-kind control word.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "objemb" => Self::Embedded,
            "objlink" => Self::Link,
            "objautlink" => Self::AutoLink,
            "objsub" => Self::Subscriber,
            "objpub" => Self::Publisher,
            "objicemb" => Self::IconEmbedded,
            "objhtml" => Self::Html,
            "objocx" => Self::Control,
            _ => return None,
        })
    }
}

/// An embedded object. Its rendered result, if any, is kept as a child
/// container in the document tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddedObject {
    /// Embedding kind
    pub kind: ObjectKind,
    /// OLE class name (`\objclass`), e.g. `Excel.Sheet.8`
    pub class_name: Option<String>,
    /// Object name (`\objname`)
    pub name: Option<String>,
    /// Width in twips (`\objw`)
    pub width: Option<i32>,
    /// Height in twips (`\objh`)
    pub height: Option<i32>,
    /// Decoded `\objdata` payload
    pub data: Vec<u8>,
}
