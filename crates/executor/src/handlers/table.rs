//! Table operations.

use scribe_core::{CellColor, Color, MAX_TABLE_DIMENSION};

use crate::context::OperationContext;
use crate::convert::for_param;
use crate::params::ParameterBag;
use crate::registry::Handler;
use crate::types::TableInfo;
use crate::{Error, Output, Result};

fn dimension(params: &ParameterBag, name: &'static str) -> Result<usize> {
    let n: usize = params.get_required(name)?;
    if n == 0 || n > MAX_TABLE_DIMENSION {
        return Err(Error::invalid(
            name,
            format!("must be between 1 and {}, got {}", MAX_TABLE_DIMENSION, n),
        ));
    }
    Ok(n)
}

/// `add_table`: params `rows`, `columns`. Cells start empty.
pub struct AddTable;

impl Handler for AddTable {
    fn name(&self) -> &'static str {
        "add_table"
    }

    fn execute(&self, ctx: &mut OperationContext<'_>, params: &ParameterBag) -> Result<Output> {
        let rows = dimension(params, "rows")?;
        let columns = dimension(params, "columns")?;

        let index = ctx.edit(|doc| doc.add_table(rows, columns))?;
        Ok(Output::message(format!(
            "Added {}x{} table at index {}",
            rows, columns, index
        )))
    }
}

/// `set_cell_colors`: params `tableIndex`, `cells` (array of
/// `{row, column, color}`).
///
/// The whole batch is validated first; one bad entry rejects all of them.
pub struct SetCellColors;

impl Handler for SetCellColors {
    fn name(&self) -> &'static str {
        "set_cell_colors"
    }

    fn execute(&self, ctx: &mut OperationContext<'_>, params: &ParameterBag) -> Result<Output> {
        let table_index: usize = params.get_required("tableIndex")?;
        let entries = params.get_objects("cells")?;
        if entries.is_empty() {
            return Err(Error::invalid("cells", "must not be empty"));
        }

        let tables = ctx.document().tables();
        let table = tables.get(table_index).ok_or_else(|| {
            Error::invalid(
                "tableIndex",
                format!("out of range: {} (length {})", table_index, tables.len()),
            )
        })?;
        let mut updates = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let row: usize = entry.get_required("row")?;
            let column: usize = entry.get_required("column")?;
            let color: String = entry.get_required("color")?;
            let width = table
                .cells
                .get(row)
                .map(Vec::len)
                .ok_or_else(|| {
                    Error::invalid(
                        format!("cells[{}].row", i),
                        format!("out of range: {} (length {})", row, table.rows()),
                    )
                })?;
            if column >= width {
                return Err(Error::invalid(
                    format!("cells[{}].column", i),
                    format!("out of range: {} (length {})", column, width),
                ));
            }
            let color = color.parse::<Color>().map_err(for_param("color"))?;
            updates.push(CellColor { row, column, color });
        }

        ctx.edit(|doc| doc.set_cell_colors(table_index, &updates))?;
        Ok(Output::message(format!(
            "Colored {} cell(s) in table {}",
            updates.len(),
            table_index
        )))
    }
}

/// `get_tables`: every table with its cells.
pub struct GetTables;

impl Handler for GetTables {
    fn name(&self) -> &'static str {
        "get_tables"
    }

    fn execute(&self, ctx: &mut OperationContext<'_>, _params: &ParameterBag) -> Result<Output> {
        let tables = ctx
            .document()
            .tables()
            .iter()
            .enumerate()
            .map(|(i, t)| TableInfo::new(i, t))
            .collect();
        Ok(Output::Tables(tables))
    }
}
