use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use catalog_core::{CellValue, Dataset};

use crate::errors::IngestError;
use crate::reader::{SourceFormat, SourceReader};

/// Reader for the markup (XML) source.
#[derive(Debug, Clone)]
pub struct MarkupReader {
    path: PathBuf,
}

impl MarkupReader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl SourceReader for MarkupReader {
    fn format(&self) -> SourceFormat {
        SourceFormat::Markup
    }

    async fn read(&self) -> Result<Dataset, IngestError> {
        read_markup(&self.path)
    }
}

/// Read an XML catalog.
///
/// Every child of the root element is one row. Attributes of the row element
/// and its direct child elements become columns; deeper nesting is ignored.
/// Empty elements are nulls.
pub fn read_markup(path: &Path) -> Result<Dataset, IngestError> {
    let mut reader = Reader::from_file(path)?;
    reader.config_mut().trim_text(true);

    let mut dataset = Dataset::default();
    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut row: Option<Vec<(String, CellValue)>> = None;
    let mut field: Option<(String, String)> = None;
    let mut saw_root = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(element) => {
                depth += 1;
                match depth {
                    1 => saw_root = true,
                    2 => row = Some(attributes(path, &element)?),
                    3 => field = Some((element_name(&element), String::new())),
                    _ => {}
                }
            }
            Event::Empty(element) => match depth + 1 {
                1 => saw_root = true,
                2 => dataset.push_record(attributes(path, &element)?),
                3 => {
                    if let Some(cells) = row.as_mut() {
                        cells.push((element_name(&element), CellValue::Null));
                    }
                }
                _ => {}
            },
            Event::Text(text) => {
                if depth == 3
                    && let Some((_, value)) = field.as_mut()
                {
                    value.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if depth == 3
                    && let Some((_, value)) = field.as_mut()
                {
                    value.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                match depth {
                    2 => {
                        if let Some(cells) = row.take() {
                            dataset.push_record(cells);
                        }
                    }
                    3 => {
                        if let (Some((name, value)), Some(cells)) = (field.take(), row.as_mut()) {
                            let cell = if value.is_empty() {
                                CellValue::Null
                            } else {
                                CellValue::Text(value)
                            };
                            cells.push((name, cell));
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(IngestError::format(
            SourceFormat::Markup,
            path,
            "document has no root element",
        ));
    }
    if depth != 0 {
        return Err(IngestError::format(
            SourceFormat::Markup,
            path,
            "document ended before the root element was closed",
        ));
    }
    Ok(dataset)
}

fn element_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).into_owned()
}

fn attributes(path: &Path, element: &BytesStart<'_>) -> Result<Vec<(String, CellValue)>, IngestError> {
    let mut cells = Vec::new();
    for attr in element.attributes() {
        let attr =
            attr.map_err(|err| IngestError::format(SourceFormat::Markup, path, err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        cells.push((key, CellValue::Text(value)));
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(contents: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("catalog_xml_{}.xml", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).expect("write temp xml");
        path
    }

    #[test]
    fn reads_child_elements_as_columns() {
        let path = temp_file(
            r#"<?xml version="1.0"?>
<productos>
  <producto><id>1</id><nombre>Arroz &amp; Co</nombre><stock/></producto>
  <producto><id>2</id><categoria>Granos</categoria></producto>
</productos>"#,
        );
        let dataset = read_markup(&path).expect("read xml");

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.columns(), &["id", "nombre", "stock", "categoria"]);
        assert_eq!(dataset.get(0, "nombre"), Some(&CellValue::text("Arroz & Co")));
        assert_eq!(dataset.get(0, "stock"), Some(&CellValue::Null));
        assert_eq!(dataset.get(1, "nombre"), Some(&CellValue::Null));
    }

    #[test]
    fn row_attributes_become_columns() {
        let path = temp_file(r#"<productos><producto id="3"><nombre>Sal</nombre></producto></productos>"#);
        let dataset = read_markup(&path).expect("read xml");
        assert_eq!(dataset.get(0, "id"), Some(&CellValue::text("3")));
    }

    #[test]
    fn empty_root_yields_no_rows() {
        let path = temp_file("<productos/>");
        let dataset = read_markup(&path).expect("read xml");
        assert!(dataset.is_empty());
    }

    #[test]
    fn mismatched_tags_are_rejected() {
        let path = temp_file("<productos><producto><id>1</nombre></producto></productos>");
        assert!(read_markup(&path).is_err());
    }
}
