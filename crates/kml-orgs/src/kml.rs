use roxmltree::{Document, Node};

/// Parses KML text. Elements are matched by local name afterwards, so the
/// document may or may not declare the KML namespace.
pub fn parse(text: &str) -> Result<Document<'_>, roxmltree::Error> {
    Document::parse(text)
}

/// Every `Placemark` in document order.
pub fn placemarks<'a, 'input>(
    document: &'a Document<'input>,
) -> impl Iterator<Item = Placemark<'a, 'input>> + 'a {
    document
        .descendants()
        .filter(|node| is_element(node, "Placemark"))
        .map(|node| Placemark { node })
}

/// Read-only view over one `Placemark` element.
#[derive(Debug, Clone, Copy)]
pub struct Placemark<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input> Placemark<'a, 'input> {
    /// Trimmed text of the placemark's own `<name>`.
    pub fn name(&self) -> Option<String> {
        child_element(self.node, "name").map(text_of)
    }

    /// Trimmed `<address>` text, or `None` when missing or blank.
    pub fn address(&self) -> Option<String> {
        self.node
            .descendants()
            .find(|node| is_element(node, "address"))
            .map(text_of)
            .filter(|value| !value.is_empty())
    }

    /// Looks up an extended data field by name.
    ///
    /// Both `<Data name="..."><value>` and schema-typed `<SimpleData name="...">`
    /// forms are accepted. Blank values count as missing.
    pub fn data_value(&self, field: &str) -> Option<String> {
        self.node
            .descendants()
            .find_map(|node| {
                if is_element(&node, "Data") && node.attribute("name") == Some(field) {
                    child_element(node, "value").map(text_of)
                } else if is_element(&node, "SimpleData") && node.attribute("name") == Some(field)
                {
                    Some(text_of(node))
                } else {
                    None
                }
            })
            .filter(|value| !value.is_empty())
    }

    /// Name of the nearest enclosing `Folder`, if it has a non-blank one.
    pub fn folder_name(&self) -> Option<String> {
        let folder = self
            .node
            .ancestors()
            .skip(1)
            .find(|node| is_element(node, "Folder"))?;
        child_element(folder, "name")
            .map(text_of)
            .filter(|value| !value.is_empty())
    }
}

fn is_element(node: &Node<'_, '_>, local_name: &str) -> bool {
    node.is_element() && node.tag_name().name() == local_name
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, local_name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| is_element(child, local_name))
}

fn text_of(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|descendant| descendant.is_text())
        .filter_map(|descendant| descendant.text())
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>Directory</name>
    <Folder>
      <name> Textiles </name>
      <Placemark>
        <name>Acme Co</name>
        <address>123 Main St, Springfield, IL 62701</address>
        <ExtendedData>
          <Data name="Website"><value>https://acme.example</value></Data>
          <Data name="Phone"><value>  </value></Data>
        </ExtendedData>
      </Placemark>
    </Folder>
    <Placemark>
      <name><![CDATA[Loose & Co]]></name>
      <ExtendedData>
        <SchemaData schemaUrl="#s">
          <SimpleData name="Org">Loose Organization</SimpleData>
        </SchemaData>
      </ExtendedData>
    </Placemark>
  </Document>
</kml>"##;

    #[test]
    fn reads_placemark_fields() {
        let document = parse(SAMPLE).expect("valid kml");
        let placemarks: Vec<_> = placemarks(&document).collect();
        assert_eq!(placemarks.len(), 2);

        let first = placemarks[0];
        assert_eq!(first.name().as_deref(), Some("Acme Co"));
        assert_eq!(
            first.address().as_deref(),
            Some("123 Main St, Springfield, IL 62701")
        );
        assert_eq!(
            first.data_value("Website").as_deref(),
            Some("https://acme.example")
        );
        assert_eq!(first.data_value("Phone"), None);
        assert_eq!(first.folder_name().as_deref(), Some("Textiles"));
    }

    #[test]
    fn placemark_outside_folder_has_no_folder_name() {
        let document = parse(SAMPLE).expect("valid kml");
        let second = placemarks(&document).nth(1).expect("second placemark");
        assert_eq!(second.name().as_deref(), Some("Loose & Co"));
        assert_eq!(second.address(), None);
        assert_eq!(second.data_value("Org").as_deref(), Some("Loose Organization"));
        assert_eq!(second.folder_name(), None);
    }

    #[test]
    fn malformed_xml_is_rejected() {
        assert!(parse("<kml><Placemark></kml>").is_err());
    }
}
