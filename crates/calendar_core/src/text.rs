use std::fmt::{self, Write as _};

use crate::{grid::GRID_COLUMNS, render::Scene};

const CELL_WIDTH: usize = 6;

/// Fixed-width rendering of a scene.
///
/// Each day cell is `LddRTS`: `[dd]` selected, `(dd)` outside the month,
/// `T` is `*` for today and `S` is `o` when a state dot is shown.
pub fn scene_to_text(scene: &Scene) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_scene(&mut out, scene);
    out
}

fn write_scene(out: &mut String, scene: &Scene) -> fmt::Result {
    let width = CELL_WIDTH * GRID_COLUMNS;
    let title = format!(
        "{} {} {}",
        scene.previous.label, scene.month_label, scene.next.label
    );
    writeln!(out, "{title:^width$}")?;

    for header in &scene.weekdays {
        write!(out, " {:<w$}", header.label, w = CELL_WIDTH - 1)?;
    }
    writeln!(out)?;

    for row in scene.days.chunks(GRID_COLUMNS) {
        for day in row {
            let (open, close) = if day.selected {
                ('[', ']')
            } else if day.outside {
                ('(', ')')
            } else {
                (' ', ' ')
            };
            let today = if day.today { '*' } else { ' ' };
            let dot = if day.dot.is_some() { 'o' } else { ' ' };
            write!(out, "{open}{:>2}{close}{today}{dot}", day.day_number)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&scene_to_text(self))
    }
}
