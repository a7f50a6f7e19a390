//! `TextureAtlas` XML descriptor parser.
//!
//! ```xml
//! <TextureAtlas imagePath="sheet.png">
//!     <SubTexture name="idle_0" x="0" y="0" width="32" height="32"/>
//! </TextureAtlas>
//! ```
//!
//! Only immediate `SubTexture` children of the root are read. Unknown
//! elements and attributes are ignored.

use crate::descriptor::{Descriptor, DescriptorFormat, Region};
use crate::error::{ParseError, ParseWarning};

use super::{finish, parse_int, ParseOptions};

/// Required root element name.
pub const ROOT_ELEMENT: &str = "TextureAtlas";

/// Element name for one region.
pub const REGION_ELEMENT: &str = "SubTexture";

/// Name used when a region has no `name` attribute.
pub const MISSING_NAME: &str = "ERROR";

/// Parses an XML descriptor leniently.
pub fn parse_xml(text: &str) -> Result<Descriptor, ParseError> {
    parse_xml_with(text, &ParseOptions::default())
}

/// Parses an XML descriptor with explicit options.
pub fn parse_xml_with(text: &str, options: &ParseOptions) -> Result<Descriptor, ParseError> {
    let document = roxmltree::Document::parse(text)
        .map_err(|e| ParseError::malformed(format!("invalid XML: {}", e)))?;

    let root = document.root_element();
    if root.tag_name().name() != ROOT_ELEMENT {
        return Err(ParseError::UnexpectedRoot {
            found: root.tag_name().name().to_string(),
        });
    }

    let mut regions = Vec::new();
    let mut diagnostics = Vec::new();

    let children = root
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == REGION_ELEMENT);

    for (index, node) in children.enumerate() {
        let mut reader = AttributeReader {
            node,
            index,
            options,
            diagnostics: &mut diagnostics,
        };

        let width = reader.int("width")?;
        let height = reader.int("height")?;
        let x = reader.int("x")?;
        let y = reader.int("y")?;
        let name = reader.name()?;

        regions.push(Region {
            name,
            x,
            y,
            width,
            height,
        });
    }

    Ok(finish(regions, DescriptorFormat::Xml, diagnostics))
}

/// Reads attributes of a single `SubTexture`, defaulting or failing on
/// missing values depending on the parse options.
struct AttributeReader<'a, 'input, 'w> {
    node: roxmltree::Node<'a, 'input>,
    index: usize,
    options: &'w ParseOptions,
    diagnostics: &'w mut Vec<ParseWarning>,
}

impl AttributeReader<'_, '_, '_> {
    fn int(&mut self, attribute: &str) -> Result<i32, ParseError> {
        match self.node.attribute(attribute) {
            Some(value) => parse_int(value, attribute),
            None => {
                self.missing(attribute, "0")?;
                Ok(0)
            }
        }
    }

    fn name(&mut self) -> Result<String, ParseError> {
        match self.node.attribute("name") {
            Some(value) => Ok(value.to_string()),
            None => {
                self.missing("name", MISSING_NAME)?;
                Ok(MISSING_NAME.to_string())
            }
        }
    }

    fn missing(&mut self, attribute: &str, default: &str) -> Result<(), ParseError> {
        if self.options.strict {
            return Err(ParseError::MissingAttribute {
                index: self.index,
                attribute: attribute.to_string(),
            });
        }

        let warning = ParseWarning::missing_attribute(self.index, attribute, default);
        tracing::warn!("{}", warning);
        self.diagnostics.push(warning);
        Ok(())
    }
}
