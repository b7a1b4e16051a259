//! Diagnostic dumps
//!
//! Pure inspection helpers, not part of the execution contract: a
//! structural dump of AST nodes (used by `run(.., debug = true)`) and a
//! symbol-table dump listing every global binding.

use crate::ast::Stmt;
use crate::interpreter::Interpreter;
use crate::value::Value;

/// Structural dump of one statement node, as compact JSON.
pub fn node(stmt: &Stmt) -> String {
    serde_json::to_string(stmt).unwrap_or_else(|err| format!("<dump failed: {err}>"))
}

/// Render a table of all global symbols: name, variant kind, an opaque
/// identity token, member-table size, and the native payload for
/// primitives.
pub fn symbol_table(interpreter: &Interpreter) -> String {
    let mut table = TextTable::new(["name", "kind", "address", "members", "native value"]);

    let mut bindings: Vec<(&String, &Value)> = interpreter.globals().iter().collect();
    bindings.sort_by_key(|(name, _)| name.as_str());

    for (name, value) in bindings {
        table.row([
            name.clone(),
            value.type_name().to_string(),
            format!("{:#x}", value as *const Value as usize),
            value
                .member_table()
                .map(|members| members.len())
                .unwrap_or(0)
                .to_string(),
            native_payload(value),
        ]);
    }

    table.render()
}

fn native_payload(value: &Value) -> String {
    match value {
        Value::Integer(int) => int.value.to_string(),
        Value::Str(s) => s.as_str().to_string(),
        Value::None(_) => "None".to_string(),
        _ => "N/A".to_string(),
    }
}

const CELL_PAD: usize = 2;

/// Minimal padded text table: upper-cased header row, one line per row,
/// columns sized to their widest cell.
struct TextTable {
    headers: [&'static str; 5],
    rows: Vec<[String; 5]>,
    widths: [usize; 5],
}

impl TextTable {
    fn new(headers: [&'static str; 5]) -> Self {
        let widths = [
            headers[0].len(),
            headers[1].len(),
            headers[2].len(),
            headers[3].len(),
            headers[4].len(),
        ];
        Self {
            headers,
            rows: Vec::new(),
            widths,
        }
    }

    fn row(&mut self, cells: [String; 5]) {
        for (width, cell) in self.widths.iter_mut().zip(cells.iter()) {
            *width = (*width).max(cell.len());
        }
        self.rows.push(cells);
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for (width, header) in self.widths.iter().zip(self.headers.iter()) {
            out.push_str(&pad(&header.to_uppercase(), width + CELL_PAD));
        }
        out.push('\n');
        for row in &self.rows {
            for (width, cell) in self.widths.iter().zip(row.iter()) {
                out.push_str(&pad(cell, width + CELL_PAD));
            }
            out.push('\n');
        }
        out
    }
}

fn pad(cell: &str, width: usize) -> String {
    format!("{cell:<width$}")
}
