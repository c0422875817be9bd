//! Rendering of command results, as tables or JSON.

use crate::errors::AppResult;
use crate::models::pomodoro::Pomodoro;
use crate::models::summary::ProjectSummary;
use crate::models::window::TimeWindow;
use crate::ui::messages::{header, info};
use crate::utils::colors::{colorize_flag, colorize_total};
use crate::utils::formatting::{secs2readable, ts2local};
use crate::utils::table::{Column, Table};
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn separator(sep: &str) -> char {
    sep.chars().next().unwrap_or('-')
}

pub fn print_pomodoro(p: &Pomodoro, project: Option<&str>) {
    println!("Pomodoro #{}", p.id);
    if let Some(name) = project {
        println!("  project:  {}", name);
    }
    println!("  start:    {} ({})", ts2local(p.start), p.start);
    println!("  end:      {}", ts2local(p.end()));
    println!("  duration: {} ({}s)", secs2readable(p.duration), p.duration);
    println!("  test:     {}", colorize_flag(p.test));
}

fn pomodoro_table(pomodoros: &[Pomodoro], sep: &str) -> Table {
    let mut table = Table::new(
        vec![
            Column::new("ID", 6),
            Column::new("START", 16),
            Column::new("END", 16),
            Column::new("DURATION", 9),
            Column::new("TEST", 4),
        ],
        separator(sep),
    );

    for p in pomodoros {
        let start = p
            .start_local()
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| p.start.to_string());
        table.add_row(vec![
            p.id.to_string(),
            start,
            ts2local(p.end()),
            secs2readable(p.duration),
            if p.test { "yes".into() } else { String::new() },
        ]);
    }
    table
}

pub fn print_summary(s: &ProjectSummary, window: &TimeWindow, details: bool, sep: &str) {
    header(format!("{} (#{})", s.name, s.id));
    println!("  window:       {}", window_label(window));
    println!("  pomodoros:    {}", s.n_pomodoros);
    println!(
        "  total:        {}",
        colorize_total(&secs2readable(s.total_duration))
    );
    println!(
        "  last touched: {}",
        if s.last_touched > 0 {
            ts2local(s.last_touched)
        } else {
            "--".into()
        }
    );

    if details && !s.pomodoros.is_empty() {
        println!();
        print!("{}", pomodoro_table(&s.pomodoros, sep).render());
    }
}

/// One line per project plus a grand total.
pub fn print_summary_list(list: &[ProjectSummary], window: &TimeWindow, details: bool, sep: &str) {
    if list.is_empty() {
        info(format!("No projects for {}.", window_label(window)));
        return;
    }

    if details {
        for s in list {
            print_summary(s, window, true, sep);
        }
        println!();
    } else {
        let mut table = Table::new(
            vec![
                Column::new("ID", 5),
                Column::new("PROJECT", 28),
                Column::new("POMODOROS", 9),
                Column::new("TOTAL", 10),
                Column::new("LAST TOUCHED", 16),
            ],
            separator(sep),
        );
        for s in list {
            table.add_row(vec![
                s.id.to_string(),
                s.name.clone(),
                s.n_pomodoros.to_string(),
                secs2readable(s.total_duration),
                if s.last_touched > 0 {
                    ts2local(s.last_touched)
                } else {
                    "--".into()
                },
            ]);
        }
        print!("{}", table.render());
    }

    let total = list
        .iter()
        .fold(0_i64, |acc, s| acc.saturating_add(s.total_duration));
    let count: usize = list.iter().map(|s| s.n_pomodoros).sum();
    println!(
        "\n{} project(s), {} pomodoro(s), {} in {}",
        list.len(),
        count,
        colorize_total(&secs2readable(total)),
        window_label(window)
    );
}

fn window_label(w: &TimeWindow) -> String {
    match (w.from, w.to) {
        (None, None) => "all time".into(),
        (Some(a), None) => format!("since {}", ts2local(a)),
        (None, Some(b)) => format!("until {}", ts2local(b)),
        (Some(a), Some(b)) => format!("{} → {}", ts2local(a), ts2local(b)),
    }
}
