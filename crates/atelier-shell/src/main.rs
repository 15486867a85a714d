// Atelier headless driver: loads the saved workspace, prints where every panel
// ended up and writes the normalized profile file back.
//
// Usage: atelier [PROFILE]

use atelier_core::{Edge, Rect};
use atelier_layout::Placement;
use atelier_shell::settings::load_settings;
use atelier_shell::{default_panels, ProfileStore, Shell};

const WINDOW: Rect = Rect::new(0.0, 0.0, 1280.0, 800.0);

fn main() {
    env_logger::init();

    let settings = load_settings();
    let store = match ProfileStore::default_location() {
        Ok(store) => Some(store),
        Err(e) => {
            log::warn!("Layout will not be persisted: {e}");
            None
        }
    };

    let mut shell = Shell::new(settings, &default_panels(), store);
    shell.load();
    shell.set_window(WINDOW, 1.0);

    if let Some(name) = std::env::args().nth(1) {
        if !shell.load_profile(&name) {
            log::warn!("No workspace profile named '{name}'");
        }
    }

    print_arrangement(&shell);
    shell.save_now();
}

fn print_arrangement(shell: &Shell) {
    let model = shell.model();
    println!("Profile: {}", shell.active_profile());
    let others = shell.profile_names();
    if !others.is_empty() {
        println!("Saved profiles: {}", others.join(", "));
    }
    println!("Toolbar: {}", shell.toolbar_position().as_str());

    for edge in Edge::ALL {
        let tree = model.dock(edge);
        println!("{edge} ({} px, {} slot(s))", shell.edge_size(edge), tree.len());
        for (group, size) in tree.groups().iter().zip(tree.item_sizes()) {
            let titles: Vec<String> = group
                .panels()
                .iter()
                .map(|&id| {
                    let title = model.title_of(id).unwrap_or("?");
                    if group.active_panel() == Some(id) && group.is_tabbed() {
                        format!("[{title}]")
                    } else {
                        title.to_string()
                    }
                })
                .collect();
            println!("  {:>5.1}%  {}", size * 100.0, titles.join(" | "));
        }
    }

    for panel in model.panels() {
        match model.placement(panel.id) {
            Placement::Floating { bounds } => println!(
                "Floating: {} at ({}, {}) {}x{}",
                panel.title, bounds.x, bounds.y, bounds.width, bounds.height
            ),
            Placement::Hidden => println!("Hidden: {}", panel.title),
            Placement::Docked { .. } => {}
        }
    }
}
