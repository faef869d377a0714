use crate::error::{Result, SanctionsError};
use crate::types::{Dataset, SanctionRecord, EXACT_MATCH_SCORE, SDN_LIST_NAME};
use crate::xml::{self, Element, Qualifier};
use tracing::{debug, info, warn};

const ROOT_ELEMENT: &str = "sdnList";
const ENTRY_ELEMENT: &str = "sdnEntry";

/// Address components in output order.
const ADDRESS_FIELDS: [&str; 6] = [
    "address1",
    "address2",
    "city",
    "stateOrProvince",
    "postalCode",
    "country",
];

const ADDRESS_SEPARATOR: &str = " | ";
const PROGRAM_SEPARATOR: &str = "; ";

/// Parse an SDN XML export into a dataset.
///
/// Extraction is all-or-nothing: any XML error fails the whole document.
/// Every `sdnEntry` yields exactly one record, however sparse it is.
pub fn extract(document: &[u8]) -> Result<Dataset> {
    let text = std::str::from_utf8(document)
        .map_err(|e| SanctionsError::Parse(format!("document is not valid UTF-8: {}", e)))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let root = xml::parse_document(text)?;
    if root.name != ROOT_ELEMENT {
        return Err(SanctionsError::Parse(format!(
            "expected <{}> root element, found <{}>",
            ROOT_ELEMENT, root.name
        )));
    }

    let qualifier = Qualifier::from_root(&root);
    debug!(
        "Resolved SDN namespace: {}",
        qualifier.namespace().unwrap_or("<none>")
    );

    let records: Vec<SanctionRecord> = root
        .children(&qualifier, ENTRY_ELEMENT)
        .map(|entry| extract_record(entry, &qualifier))
        .collect();

    let mut dataset = Dataset::new(records);
    if let Some(header) = root.child(&qualifier, "publshInformation") {
        dataset.publish_date = header
            .child_text(&qualifier, "Publish_Date")
            .map(str::to_string);
        dataset.declared_count = header
            .child_text(&qualifier, "Record_Count")
            .and_then(|count| count.parse().ok());
    }

    if let Some(declared) = dataset.declared_count {
        if declared != dataset.len() {
            warn!(
                "SDN header declares {} records but {} entries were found",
                declared,
                dataset.len()
            );
        }
    }

    info!(
        "Extracted {} SDN records (published {})",
        dataset.len(),
        dataset.publish_date.as_deref().unwrap_or("unknown")
    );

    Ok(dataset)
}

fn extract_record(entry: &Element, qualifier: &Qualifier) -> SanctionRecord {
    SanctionRecord {
        official_name: person_name(entry, qualifier),
        alias_names: alias_names(entry, qualifier),
        address: address(entry, qualifier),
        entry_type: entry
            .child_text(qualifier, "sdnType")
            .unwrap_or_default()
            .to_string(),
        programs: programs(entry, qualifier),
        list_name: SDN_LIST_NAME.to_string(),
        score: EXACT_MATCH_SCORE.to_string(),
    }
}

/// "first last", or whichever half is present.
fn person_name(element: &Element, qualifier: &Qualifier) -> String {
    let first = element.child_text(qualifier, "firstName");
    let last = element.child_text(qualifier, "lastName");

    match (first, last) {
        (Some(first), Some(last)) => format!("{} {}", first, last),
        (Some(name), None) | (None, Some(name)) => name.to_string(),
        (None, None) => String::new(),
    }
}

fn alias_names(entry: &Element, qualifier: &Qualifier) -> Vec<String> {
    let Some(aka_list) = entry.child(qualifier, "akaList") else {
        return Vec::new();
    };

    aka_list
        .children(qualifier, "aka")
        .map(|aka| person_name(aka, qualifier))
        .filter(|name| !name.is_empty())
        .collect()
}

fn address(entry: &Element, qualifier: &Qualifier) -> String {
    let Some(address_list) = entry.child(qualifier, "addressList") else {
        return String::new();
    };

    address_list
        .children(qualifier, "address")
        .map(|address| {
            ADDRESS_FIELDS
                .iter()
                .filter_map(|field| address.child_text(qualifier, field))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(ADDRESS_SEPARATOR)
}

fn programs(entry: &Element, qualifier: &Qualifier) -> String {
    let Some(program_list) = entry.child(qualifier, "programList") else {
        return String::new();
    };

    program_list
        .children(qualifier, "program")
        .filter_map(Element::trimmed_text)
        .collect::<Vec<_>>()
        .join(PROGRAM_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "https://sanctionslistservice.ofac.treas.gov/api/PublicationPreview/exports/XML";

    fn document(namespace: Option<&str>, entries: &str) -> String {
        let xmlns = namespace
            .map(|ns| format!(r#" xmlns="{}""#, ns))
            .unwrap_or_default();
        format!(
            r#"<?xml version="1.0" standalone="yes"?>
<sdnList{}>
  <publshInformation>
    <Publish_Date>10/17/2026</Publish_Date>
    <Record_Count>3</Record_Count>
  </publshInformation>
  {}
</sdnList>"#,
            xmlns, entries
        )
    }

    const JOHN_DOE: &str = r#"
  <sdnEntry>
    <uid>36</uid>
    <firstName>JOHN</firstName>
    <lastName>DOE</lastName>
    <sdnType>Individual</sdnType>
    <programList>
      <program>SDGT</program>
    </programList>
    <akaList>
      <aka>
        <uid>12</uid>
        <type>a.k.a.</type>
        <category>strong</category>
        <firstName>J.</firstName>
        <lastName>DOE</lastName>
      </aka>
    </akaList>
    <addressList>
      <address>
        <uid>25</uid>
        <city>Panama</city>
        <country>Panama</country>
      </address>
    </addressList>
  </sdnEntry>"#;

    #[test]
    fn test_full_entry_with_namespace() {
        let dataset = extract(document(Some(NS), JOHN_DOE).as_bytes()).unwrap();

        assert_eq!(dataset.len(), 1);
        let record = &dataset.records()[0];
        assert_eq!(record.official_name, "JOHN DOE");
        assert_eq!(record.alias_names, vec!["J. DOE".to_string()]);
        assert_eq!(record.address, "Panama Panama");
        assert_eq!(record.entry_type, "Individual");
        assert_eq!(record.programs, "SDGT");
        assert_eq!(record.list_name, "SDN");
        assert_eq!(record.score, "100");

        assert_eq!(dataset.publish_date.as_deref(), Some("10/17/2026"));
        assert_eq!(dataset.declared_count, Some(3));
    }

    #[test]
    fn test_same_entry_without_namespace() {
        let qualified = extract(document(Some(NS), JOHN_DOE).as_bytes()).unwrap();
        let unqualified = extract(document(None, JOHN_DOE).as_bytes()).unwrap();
        assert_eq!(qualified.records(), unqualified.records());
    }

    #[test]
    fn test_name_composition() {
        let entries = r#"
  <sdnEntry><lastName>AEROCARIBBEAN AIRLINES</lastName><sdnType>Entity</sdnType></sdnEntry>
  <sdnEntry><firstName>MADONNA</firstName></sdnEntry>
  <sdnEntry><sdnType>Vessel</sdnType></sdnEntry>"#;
        let dataset = extract(document(None, entries).as_bytes()).unwrap();

        let names: Vec<_> = dataset.iter().map(|r| r.official_name.as_str()).collect();
        assert_eq!(names, vec!["AEROCARIBBEAN AIRLINES", "MADONNA", ""]);
    }

    #[test]
    fn test_sparse_entries_are_kept_in_order() {
        let entries = r#"
  <sdnEntry><lastName>FIRST</lastName></sdnEntry>
  <sdnEntry></sdnEntry>
  <sdnEntry><lastName>THIRD</lastName><akaList></akaList><addressList/></sdnEntry>"#;
        let dataset = extract(document(None, entries).as_bytes()).unwrap();

        assert_eq!(dataset.len(), 3);
        let empty = &dataset.records()[1];
        assert_eq!(empty.official_name, "");
        assert!(empty.alias_names.is_empty());
        assert_eq!(empty.address, "");
        assert_eq!(empty.entry_type, "");
        assert_eq!(empty.programs, "");
        assert_eq!(empty.list_name, "SDN");
        assert_eq!(dataset.records()[2].official_name, "THIRD");
    }

    #[test]
    fn test_address_field_order_and_separators() {
        let entries = r#"
  <sdnEntry>
    <lastName>DRAGON ROAD LTD</lastName>
    <addressList>
      <address>
        <country>Hong Kong</country>
        <city>Kowloon</city>
        <address1>Unit 5</address1>
        <postalCode>999077</postalCode>
      </address>
      <address><uid>1</uid></address>
      <address>
        <address1>12 Harbour St</address1>
        <address2>Floor 3</address2>
        <city>Limassol</city>
        <stateOrProvince>Limassol District</stateOrProvince>
        <country>Cyprus</country>
      </address>
    </addressList>
  </sdnEntry>"#;
        let dataset = extract(document(None, entries).as_bytes()).unwrap();

        assert_eq!(
            dataset.records()[0].address,
            "Unit 5 Kowloon 999077 Hong Kong | 12 Harbour St Floor 3 Limassol Limassol District Cyprus"
        );
    }

    #[test]
    fn test_programs_and_aliases() {
        let entries = r#"
  <sdnEntry>
    <lastName>ACME SHIPPING</lastName>
    <programList>
      <program>IRAN</program>
      <program> SDGT </program>
      <program></program>
      <program>IFSR</program>
    </programList>
    <akaList>
      <aka><lastName>ACME MARINE</lastName></aka>
      <aka><uid>2</uid></aka>
      <aka><firstName>Acme</firstName><lastName>Lines</lastName></aka>
    </akaList>
  </sdnEntry>"#;
        let dataset = extract(document(None, entries).as_bytes()).unwrap();
        let record = &dataset.records()[0];

        assert_eq!(record.programs, "IRAN; SDGT; IFSR");
        assert_eq!(record.alias_names, vec!["ACME MARINE", "Acme Lines"]);
    }

    #[test]
    fn test_foreign_namespace_elements_are_ignored() {
        let xml = format!(
            r#"<sdnList xmlns="{}" xmlns:x="urn:other">
  <sdnEntry><lastName>REAL</lastName><x:firstName>FAKE</x:firstName></sdnEntry>
  <x:sdnEntry><lastName>IGNORED</lastName></x:sdnEntry>
</sdnList>"#,
            NS
        );
        let dataset = extract(xml.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].official_name, "REAL");
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let mut bytes = "\u{feff}".as_bytes().to_vec();
        bytes.extend_from_slice(document(None, JOHN_DOE).as_bytes());
        assert_eq!(extract(&bytes).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_failures() {
        assert!(matches!(
            extract(b"<sdnList><sdnEntry></sdnList>"),
            Err(SanctionsError::Parse(_))
        ));
        assert!(matches!(
            extract(&[0x3c, 0xff, 0xfe, 0x3e]),
            Err(SanctionsError::Parse(_))
        ));
        assert!(matches!(
            extract(b"<catalog><sdnEntry/></catalog>"),
            Err(SanctionsError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_list() {
        let dataset = extract(b"<sdnList></sdnList>").unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.publish_date, None);
    }
}
