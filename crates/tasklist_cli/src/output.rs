use tabled::settings::Style;
use tabled::{Table, Tabled};
use tasklist_core::components::ListView;
use tasklist_core::config::Palette;
use tasklist_core::controller::{AppView, RenderStats};
use tasklist_core::model::TaskId;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: TaskId,
    #[tabled(rename = "Task")]
    description: String,
}

pub fn list_table(list: &ListView) -> String {
    if list.is_empty() {
        return "(no tasks)".to_string();
    }

    let rows = list.rows.iter().map(|row| TaskRow {
        id: row.id,
        description: row.description.clone(),
    });
    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

pub fn view_heading(view: &AppView, palette: &Palette) -> String {
    let shown = view.list.len();
    if view.search_term.is_empty() {
        palette.accentize(&format!("Tasks ({shown})"))
    } else {
        format!(
            "{} {}",
            palette.accentize(&format!("Tasks ({shown} of {})", view.total)),
            palette.mutedize(&format!("matching \"{}\"", view.search_term)),
        )
    }
}

pub fn print_view_plain(view: &AppView, palette: &Palette) {
    println!("{}", view_heading(view, palette));
    println!("{}", list_table(&view.list));
}

pub fn view_json(view: &AppView) -> serde_json::Value {
    let tasks: Vec<serde_json::Value> = view
        .list
        .rows
        .iter()
        .map(|row| {
            serde_json::json!({
                "id": row.id,
                "description": row.description,
            })
        })
        .collect();

    serde_json::json!({
        "draft": view.draft,
        "search_term": view.search_term,
        "total": view.total,
        "tasks": tasks,
    })
}

pub fn print_view_json(view: &AppView) {
    println!("{}", view_json(view));
}

pub fn print_stats_plain(stats: &RenderStats) {
    println!("app renders: {}", stats.app_renders);
    println!("filter recomputes: {}", stats.filter_recomputes);
    println!("delete handles created: {}", stats.handle_creations);
    println!("list renders: {}", stats.list_renders);
    println!("item renders: {}", stats.item_renders);
}
