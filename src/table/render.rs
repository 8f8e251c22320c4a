use csv::{Terminator, WriterBuilder};

use crate::error::{Context, Result};

use super::MergedTable;

const CSV_SLOT: &str = "var csv = \"\";";

const HTML_TEMPLATE: &str = r#"<html>
	<head>
	<script src="https://cdnjs.cloudflare.com/ajax/libs/dygraph/1.2/dygraph-combined.min.js"></script>
	</head>
	<body>
		<div id="graphdiv"></div>
		<script>
			var csv = "";
			new Dygraph(document.getElementById("graphdiv"),csv);
		</script>
	</body>
</html>
"#;

/// Render `Date,<columns..>` followed by one line per date, ascending.
///
/// Missing values between reported columns render as empty cells; a row stops
/// at its last reported column instead of being padded to the header width.
/// So with header `Date,Foo,Bar`, a date only `Bar` reported renders as
/// `d,,3`, while a date only `Foo` reported renders as `d,3` with no trailing
/// empty cell for `Bar`.
pub fn render_csv(table: &MergedTable) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(
        std::iter::once("Date").chain(table.columns().iter().map(String::as_str)),
    )?;

    for (date, slots) in table.rows() {
        let width = slots
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |idx| idx + 1);
        let cells = slots[..width]
            .iter()
            .map(|slot| slot.as_deref().unwrap_or(""));
        writer.write_record(std::iter::once(date).chain(cells))?;
    }

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    let csv = String::from_utf8(bytes).context("rendered CSV is not valid UTF-8")?;
    Ok(csv)
}

/// Embed `csv` into the dygraph page as a JavaScript string literal.
pub fn render_html(csv: &str) -> String {
    let literal = format!("var csv = \"{}\";", escape_js_string(csv));
    HTML_TEMPLATE.replacen(CSV_SLOT, &literal, 1)
}

fn escape_js_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 16);
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            // keep `</script>` inside the literal from closing the tag
            '<' if chars.peek() == Some(&'/') => escaped.push_str("<\\"),
            other => escaped.push(other),
        }
    }
    escaped
}
