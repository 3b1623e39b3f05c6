use std::io::{self, Write};

use frc_forge::{ForceField, InteractionTable, Warning};

use crate::util::text::{format_values, truncate};

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

pub fn print_model_summary(ff: &ForceField) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let with_nonbond = ff.atom_types.iter().filter(|a| a.nonbond.is_some()).count();
    let cross_terms: usize = [&ff.bonds, &ff.angles, &ff.dihedrals, &ff.impropers]
        .iter()
        .flat_map(|table| table.iter())
        .map(|record| record.cross_terms.len())
        .sum();

    let rows = vec![
        ("Atom Types", ff.atom_types.len().to_string()),
        ("With Nonbond", with_nonbond.to_string()),
        ("Bond Increments", ff.bond_increments.len().to_string()),
        ("Bonds", ff.bonds.len().to_string()),
        ("Angles", ff.angles.len().to_string()),
        ("Dihedrals", ff.dihedrals.len().to_string()),
        ("Impropers", ff.impropers.len().to_string()),
        ("Cross Terms", cross_terms.to_string()),
        ("Warnings", ff.warnings.len().to_string()),
    ];

    print_kv_table(&mut out, "Force Field Summary", &rows);
}

pub fn print_atom_types(ff: &ForceField, limit: usize) {
    if ff.atom_types.is_empty() || limit == 0 {
        return;
    }

    let stderr = io::stderr();
    let mut out = stderr.lock();

    let rows: Vec<[String; 4]> = ff
        .atom_types
        .iter()
        .map(|atom| {
            [
                atom.name.clone(),
                atom.element.clone(),
                format!("{:.4}", atom.mass),
                atom.description.clone(),
            ]
        })
        .collect();

    print_grid(
        &mut out,
        "Atom Types",
        ["Type", "Elem", "Mass", "Description"],
        [8, 4, 9],
        &rows,
        limit,
    );
}

pub fn print_interactions(ff: &ForceField, limit: usize) {
    if limit == 0 {
        return;
    }

    let stderr = io::stderr();
    let mut out = stderr.lock();

    for (title, table) in [
        ("Bonds", &ff.bonds),
        ("Angles", &ff.angles),
        ("Dihedrals", &ff.dihedrals),
        ("Impropers", &ff.impropers),
    ] {
        print_interaction_table(&mut out, title, table, limit);
    }
}

fn print_interaction_table(out: &mut impl Write, title: &str, table: &InteractionTable, limit: usize) {
    if table.is_empty() {
        return;
    }

    let rows: Vec<[String; 4]> = table
        .iter()
        .map(|record| {
            let extras: Vec<&str> = record.cross_terms.keys().map(|k| k.label()).collect();
            let params = if extras.is_empty() {
                format_values(&record.params)
            } else {
                format!("{} +{}", format_values(&record.params), extras.join(","))
            };
            [
                record.key.to_string(),
                record.style.to_string(),
                record.priority.to_string(),
                params,
            ]
        })
        .collect();

    print_grid(
        out,
        title,
        ["Key", "Style", "Prio", "Parameters"],
        [16, 8, 6],
        &rows,
        limit,
    );
}

pub fn print_warnings(warnings: &[Warning]) {
    if warnings.is_empty() {
        return;
    }

    let stderr = io::stderr();
    let mut out = stderr.lock();

    let _ = writeln!(out, "{}┌─ Warnings ({}) ─┐", INDENT, warnings.len());
    for warning in warnings {
        let _ = writeln!(
            out,
            "{}  \x1b[33m!\x1b[0m {}",
            INDENT,
            truncate(&warning.to_string(), SAFE_TABLE_WIDTH - 4)
        );
    }
    let _ = writeln!(out);
}

/// Draws a four-column table; the last column takes the remaining width.
fn print_grid(
    out: &mut impl Write,
    title: &str,
    headers: [&str; 4],
    widths: [usize; 3],
    rows: &[[String; 4]],
    limit: usize,
) {
    let sep_overhead = 3 * 3 + 4;
    let last_w = SAFE_TABLE_WIDTH.saturating_sub(widths.iter().sum::<usize>() + sep_overhead);
    let w = [widths[0], widths[1], widths[2], last_w];
    let rule = |left: &str, mid: &str, right: &str| {
        let cells: Vec<String> = w.iter().map(|n| "─".repeat(n + 2)).collect();
        format!("{}{}{}{}", INDENT, left, cells.join(mid), right)
    };
    let row = |cells: [&str; 4]| {
        format!(
            "{}│ {:<a$} │ {:<b$} │ {:>c$} │ {:<d$} │",
            INDENT,
            truncate(cells[0], w[0]),
            truncate(cells[1], w[1]),
            truncate(cells[2], w[2]),
            truncate(cells[3], w[3]),
            a = w[0],
            b = w[1],
            c = w[2],
            d = w[3]
        )
    };

    let _ = writeln!(out, "{}┌─ {} ─┐", INDENT, truncate(title, SAFE_TABLE_WIDTH - 6));
    let _ = writeln!(out, "{}", rule("┌", "┬", "┐"));
    let _ = writeln!(out, "{}", row(headers));
    let _ = writeln!(out, "{}", rule("├", "┼", "┤"));

    for cells in rows.iter().take(limit) {
        let _ = writeln!(out, "{}", row(cells.each_ref().map(String::as_str)));
    }
    if rows.len() > limit {
        let more = format!("({} more)", rows.len() - limit);
        let _ = writeln!(out, "{}", row(["...", "", "", more.as_str()]));
    }

    let _ = writeln!(out, "{}", rule("└", "┴", "┘"));
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w),
            key_w = key_w,
            val_w = val_w
        );
    }

    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
}
