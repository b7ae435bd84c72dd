use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};

use super::{DocumentKind, ExtractionError};

/// Collects the visible text of a DOCX body, one line per paragraph.
/// Table cells are walked in reading order.
pub(super) fn extract_docx(data: &[u8]) -> Result<String, ExtractionError> {
    let docx = read_docx(data).map_err(|e| ExtractionError::Decode {
        kind: DocumentKind::Docx,
        message: e.to_string(),
    })?;

    let mut text = String::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(p) => push_paragraph(p, &mut text),
            DocumentChild::Table(t) => push_table(t, &mut text),
            _ => {}
        }
    }
    Ok(text)
}

fn push_paragraph(paragraph: &Paragraph, out: &mut String) {
    push_paragraph_children(&paragraph.children, out);
    out.push('\n');
}

fn push_paragraph_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        RunChild::Break(_) => out.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, out),
            _ => {}
        }
    }
}

fn push_table(table: &Table, out: &mut String) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row else {
            continue;
        };
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell else {
                continue;
            };
            for content in &cell.children {
                if let TableCellContent::Paragraph(p) = content {
                    push_paragraph(p, out);
                }
            }
        }
    }
}
