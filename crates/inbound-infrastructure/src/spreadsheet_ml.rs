//! SpreadsheetML 2003 workbook writer.
//!
//! Produces a single XML document that Excel and LibreOffice open as a
//! multi-sheet workbook, with bold headers, column widths and clickable links.

use inbound_core::projection::{Cell, Sheet, Workbook, WorkbookWriter};
use inbound_core::{InboundError, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};

const SPREADSHEET_NS: &str = "urn:schemas-microsoft-com:office:spreadsheet";
const HEADER_STYLE: &str = "Header";
const LINK_STYLE: &str = "Link";
/// Points per character of column width.
const POINTS_PER_CHAR: f64 = 7.0;

#[derive(Debug, Default, Clone, Copy)]
pub struct SpreadsheetMlWriter;

impl WorkbookWriter for SpreadsheetMlWriter {
    fn extension(&self) -> &'static str {
        "xml"
    }

    fn write(&self, workbook: &Workbook) -> Result<Vec<u8>> {
        let mut xml = XmlOut::new();
        xml.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        xml.event(Event::PI(BytesPI::new(r#"mso-application progid="Excel.Sheet""#)))?;

        xml.start("Workbook", &[("xmlns", SPREADSHEET_NS), ("xmlns:ss", SPREADSHEET_NS)])?;
        write_styles(&mut xml)?;
        for sheet in &workbook.sheets {
            write_sheet(&mut xml, sheet)?;
        }
        xml.end("Workbook")?;

        Ok(xml.finish())
    }
}

struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 1),
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.writer.write_event(event).map_err(|e| InboundError::Serialization {
            format: "SpreadsheetML".to_string(),
            message: e.to_string(),
        })
    }

    fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.event(Event::Start(element))
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.event(Event::Empty(element))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.event(Event::Text(BytesText::new(text)))
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

fn write_styles(xml: &mut XmlOut) -> Result<()> {
    xml.start("Styles", &[])?;

    xml.start("Style", &[("ss:ID", HEADER_STYLE)])?;
    xml.empty("Font", &[("ss:Bold", "1")])?;
    xml.end("Style")?;

    xml.start("Style", &[("ss:ID", LINK_STYLE)])?;
    xml.empty("Font", &[("ss:Color", "#0563C1"), ("ss:Underline", "Single")])?;
    xml.end("Style")?;

    xml.end("Styles")
}

fn write_sheet(xml: &mut XmlOut, sheet: &Sheet) -> Result<()> {
    xml.start("Worksheet", &[("ss:Name", sheet.name.as_str())])?;
    xml.start("Table", &[])?;

    for width in &sheet.widths {
        let points = format!("{}", width * POINTS_PER_CHAR);
        xml.empty("Column", &[("ss:Width", points.as_str())])?;
    }

    xml.start("Row", &[])?;
    for column in &sheet.columns {
        xml.start("Cell", &[("ss:StyleID", HEADER_STYLE)])?;
        write_data(xml, "String", column)?;
        xml.end("Cell")?;
    }
    xml.end("Row")?;

    for row in &sheet.rows {
        xml.start("Row", &[])?;
        for cell in row {
            write_cell(xml, cell)?;
        }
        xml.end("Row")?;
    }

    xml.end("Table")?;
    xml.end("Worksheet")
}

fn write_cell(xml: &mut XmlOut, cell: &Cell) -> Result<()> {
    match cell {
        Cell::Text(text) => {
            xml.start("Cell", &[])?;
            write_data(xml, "String", text)?;
        }
        Cell::Number(n) => {
            xml.start("Cell", &[])?;
            write_data(xml, "Number", &n.to_string())?;
        }
        Cell::Link { label, url } => {
            xml.start("Cell", &[("ss:HRef", url.as_str()), ("ss:StyleID", LINK_STYLE)])?;
            write_data(xml, "String", label)?;
        }
    }
    xml.end("Cell")
}

fn write_data(xml: &mut XmlOut, kind: &str, value: &str) -> Result<()> {
    xml.start("Data", &[("ss:Type", kind)])?;
    xml.text(value)?;
    xml.end("Data")
}
