//! Interactive PDT command prompt
//!
//! Runs precision drawing commands against a cube in edit mode.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example interactive
//! ```
//!
//! ## Input
//!
//! Type commands at the `PDT> ` prompt:
//!
//! - `CA1,2,3` - Put the cursor at (1, 2, 3)
//! - `GD0,0,1` - Move the selection up by 1
//! - `SP50` - Split the selected edges at their midpoints
//! - `select 0 6` - Select vertices 0 and 6, in that order
//! - `select none` - Clear the selection
//! - `set flip_angle on` - Change a setting
//! - `get plane` - Show a setting
//! - `show` - Print the cursor and mesh summary
//! - `quit` or `exit` - Leave the prompt

use lin_alg::f64::Vec3;
use pdt_cmd::{ActiveObjectProvider, CommandExecutor, Session};
use pdt_mesh::{EditMesh, GeomSet, ObjectMode, Scene, SceneObject, VertexIndex};
use pdt_settings::SceneSettings;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

fn seed_scene() -> Scene {
    let mut scene = Scene::new();
    let cube = scene.add_object(
        SceneObject::new("Cube")
            .with_location(Vec3::new(0.0, 0.0, 1.0))
            .with_mesh(EditMesh::cube(2.0)),
    );
    if let Err(e) = scene
        .set_active(cube)
        .and_then(|_| scene.set_mode(ObjectMode::Edit))
    {
        log::error!("Failed to enter edit mode: {}", e);
    }
    scene
}

fn show(scene: &Scene) {
    let cursor = scene.cursor_location();
    println!("cursor [{:.4}, {:.4}, {:.4}]", cursor.x, cursor.y, cursor.z);
    match scene.edit_mesh() {
        Ok(mesh) => {
            println!(
                "{} vertices, {} edges, {} faces",
                mesh.vertex_count(),
                mesh.edge_count(),
                mesh.face_count()
            );
            for v in mesh.selected_vertices() {
                if let Some(co) = mesh.position(v) {
                    println!("  v{} [{:.4}, {:.4}, {:.4}]", v.0, co.x, co.y, co.z);
                }
            }
        }
        Err(e) => println!("{}", e),
    }
}

fn select(scene: &mut Scene, words: &[&str]) {
    let mesh = match scene.edit_mesh_mut() {
        Ok(mesh) => mesh,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };
    if words == ["none"] {
        if let Err(e) = mesh.set_selection(&GeomSet::new()) {
            println!("{}", e);
        }
        mesh.clear_history();
        return;
    }
    for word in words {
        let result = word
            .parse::<u32>()
            .map_err(|e| e.to_string())
            .and_then(|i| mesh.select_vertex(VertexIndex(i)).map_err(|e| e.to_string()));
        if let Err(e) = result {
            println!("Cannot select '{}': {}", word, e);
        }
    }
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let session = Session::with_executor(
        seed_scene(),
        SceneSettings::new(),
        CommandExecutor::new(),
    );

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to create line editor: {}", e);
            return;
        }
    };

    loop {
        match rl.readline("PDT> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "quit" || line == "exit" {
                    break;
                }
                let _ = rl.add_history_entry(line);

                let words: Vec<&str> = line.split_whitespace().collect();
                match words.as_slice() {
                    ["set", name, value] => {
                        if let Err(e) = session.set(name, value) {
                            println!("{}", e);
                        }
                    }
                    ["get", name] => match session.get(name) {
                        Ok(value) => println!("{} = {}", name, value),
                        Err(e) => println!("{}", e),
                    },
                    ["show"] => session.with_document(show),
                    ["select", rest @ ..] => session.with_document_mut(|scene| select(scene, rest)),
                    _ => {
                        if session.submit(line).is_err() {
                            println!("{}", session.last_error());
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                // Ctrl+C or Ctrl+D
                log::info!("EOF/interrupt received, exiting...");
                break;
            }
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }
    }
}
