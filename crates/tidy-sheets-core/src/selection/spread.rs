//! Propagating labels into blank cells

use std::collections::BTreeMap;

use super::Selectable;
use crate::direction::Direction;
use crate::error::Result;
use crate::table::CellId;

impl Selectable {
    /// Copy each non-blank value into the blank cells that follow it in `direction`
    ///
    /// Works one row (horizontal directions) or one column (vertical
    /// directions) at a time, in that direction's reading order. A value is
    /// carried over the selected cells of its row/column until the next
    /// non-blank selected cell. Unselected cells in between are skipped, so
    /// they neither receive nor stop the value. This is how merged or implied
    /// labels (a year written once above several quarters) become explicit.
    pub fn spread(&self, direction: Direction) -> Result<Selectable> {
        direction.require_unbounded("spread")?;

        let table = self.table();

        let mut bands: BTreeMap<u32, Vec<CellId>> = BTreeMap::new();
        for &id in &self.cells {
            let cell = table.cell(id);
            let band = if direction.is_horizontal() { cell.y } else { cell.x };
            bands.entry(band).or_default().push(id);
        }

        let mut overrides = self.overrides().clone();
        for (_, mut ids) in bands {
            // ids are in reading order; reverse for the travel towards the origin
            if direction.is_towards_origin() {
                ids.reverse();
            }

            // nothing carries from one band into the next
            let mut carried: Option<String> = None;
            for id in ids {
                let cell = self.cell(id);
                if cell.is_blank(true) {
                    if let Some(value) = &carried {
                        overrides.insert(id, value.clone());
                    }
                } else {
                    carried = Some(cell.value.clone());
                }
            }
        }

        log::trace!(
            "spread {} filled {} cell(s)",
            direction,
            overrides.len() - self.overrides().len()
        );
        Ok(self.with_overrides(overrides))
    }
}
