//! XML feed parsing.
//!
//! Every element named after the feed's record tag becomes one
//! [`RawRecord`] holding the text of its direct child elements. When a child
//! name repeats, the first occurrence wins. Records are returned in document
//! order, including records nested inside others.

use cerca_models::RawRecord;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::FeedError;

/// Parses all `record_tag` elements of `xml` into raw records.
///
/// # Errors
///
/// Returns [`FeedError::Xml`] if the document is not well-formed.
pub fn parse_records(xml: &[u8], record_tag: &str) -> Result<Vec<RawRecord>, FeedError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let tag = record_tag.as_bytes();
    let mut records: Vec<RawRecord> = Vec::new();
    // (index into `records`, element depth of the record)
    let mut open: Vec<(usize, usize)> = Vec::new();
    let mut depth = 0usize;
    let mut field: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                depth += 1;
                field = None;
                if e.name().as_ref() == tag {
                    records.push(RawRecord::new());
                    open.push((records.len() - 1, depth));
                } else if let Some(&(idx, record_depth)) = open.last() {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    if depth == record_depth + 1 && !records[idx].has(&name) {
                        records[idx].insert(name.clone(), None);
                        field = Some(name);
                    }
                }
            }
            Event::Empty(e) => {
                if e.name().as_ref() == tag {
                    records.push(RawRecord::new());
                } else if let Some(&(idx, record_depth)) = open.last() {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    if depth == record_depth && !records[idx].has(&name) {
                        records[idx].insert(name, None);
                    }
                }
            }
            Event::End(e) => {
                if let Some(&(_, record_depth)) = open.last() {
                    if depth == record_depth && e.name().as_ref() == tag {
                        open.pop();
                    }
                }
                depth = depth.saturating_sub(1);
                field = None;
            }
            Event::Text(t) => {
                if let Some((name, &(idx, _))) = field.as_ref().zip(open.last()) {
                    records[idx].append_text(name, &t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let Some((name, &(idx, _))) = field.as_ref().zip(open.last()) {
                    records[idx].append_text(name, &String::from_utf8_lossy(&c));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    log::debug!("Parsed {} <{record_tag}> records", records.len());

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGENDA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<response>
  <body>
    <resultat>
      <actes>
        <acte>
          <item>
            <name>Jazz &amp; Blues</name>
            <institutionname><![CDATA[Sala <Apolo>]]></institutionname>
            <gmapx>41.3743</gmapx>
            <gmapy>2.1697</gmapy>
            <proxdate>10/03/2017</proxdate>
            <proxhour/>
            <extra><gmapx>1.0</gmapx></extra>
          </item>
        </acte>
        <acte>
          <item>
            <name>Poetry reading</name>
          </item>
        </acte>
      </actes>
    </resultat>
  </body>
</response>"#;

    #[test]
    fn collects_direct_children_of_each_record() {
        let records = parse_records(AGENDA.as_bytes(), "item").unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.get("name"), Some("Jazz & Blues"));
        assert_eq!(first.get("institutionname"), Some("Sala <Apolo>"));
        assert_eq!(first.get("gmapx"), Some("41.3743"));
        assert_eq!(first.get("proxdate"), Some("10/03/2017"));
        assert!(first.has("proxhour"));
        assert_eq!(first.get("proxhour"), None);
        assert!(first.has("extra"));

        assert_eq!(records[1].get("name"), Some("Poetry reading"));
        assert!(!records[1].has("gmapx"));
    }

    #[test]
    fn nested_records_keep_document_order() {
        let xml = "<root><item><id>1</id><item><id>2</id></item><name>outer</name></item></root>";
        let records = parse_records(xml.as_bytes(), "item").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("id"), Some("1"));
        assert_eq!(records[0].get("name"), Some("outer"));
        assert_eq!(records[1].get("id"), Some("2"));
        assert!(!records[1].has("name"));
    }

    #[test]
    fn first_repeated_child_wins() {
        let xml = "<root><item><name>first</name><name>second</name>\
                   <gmapx/><gmapx>41.4</gmapx><proxhour>20.00 h</proxhour><proxhour/></item></root>";
        let records = parse_records(xml.as_bytes(), "item").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("name"), Some("first"));
        assert!(records[0].has("gmapx"));
        assert_eq!(records[0].get("gmapx"), None);
        assert_eq!(records[0].get("proxhour"), Some("20.00 h"));
    }

    #[test]
    fn parses_bicing_stations() {
        let xml = "<bicing_stations><updatetime>1489000000</updatetime>\
                   <station><id>1</id><lat>41.397952</lat><long>2.180042</long>\
                   <slots>19</slots><bikes>3</bikes></station>\
                   <station><id>2</id><lat>41.39553</lat><long>2.17706</long>\
                   <slots>0</slots><bikes>21</bikes></station></bicing_stations>";
        let records = parse_records(xml.as_bytes(), "station").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("slots"), Some("0"));
        assert!(!records[0].has("updatetime"));
    }

    #[test]
    fn empty_document_has_no_records() {
        assert!(parse_records(b"<root/>", "item").unwrap().is_empty());
        assert!(parse_records(b"", "item").unwrap().is_empty());
    }

    #[test]
    fn rejects_mismatched_tags() {
        let xml = "<root><item><id>1</name></item></root>";
        assert!(matches!(
            parse_records(xml.as_bytes(), "item"),
            Err(FeedError::Xml(_))
        ));
    }
}
