use maze_host::{generate_maze, load_layout, render_layout, save_layout, MazeConfig, OutputFormat};
use std::env;
use std::time::Instant;

fn main() {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "generate" => {
            // Positional numbers first, then the optional flag, then the output file
            let mut positional = Vec::new();
            let mut format = OutputFormat::default();
            let mut output_file = None;
            let mut i = 2;

            while i < args.len() {
                if args[i] == "--format" {
                    let value = args.get(i + 1).unwrap_or_else(|| {
                        eprintln!("❌ Error: --format requires a value (json|text|binary)");
                        std::process::exit(1);
                    });
                    format = value.parse().unwrap_or_else(|e| {
                        eprintln!("❌ Error: {}", e);
                        std::process::exit(1);
                    });
                    i += 2;
                } else if positional.len() < 3 && output_file.is_none() {
                    match args[i].parse::<f64>() {
                        Ok(value) => positional.push(value),
                        Err(_) => output_file = Some(args[i].as_str()),
                    }
                    i += 1;
                } else if output_file.is_none() {
                    output_file = Some(args[i].as_str());
                    i += 1;
                } else {
                    eprintln!("❌ Error: Unexpected argument '{}'", args[i]);
                    std::process::exit(1);
                }
            }

            let config = MazeConfig {
                width: positional.first().copied(),
                height: positional.get(1).copied(),
                seed: positional.get(2).copied(),
            };

            generate_command(&config, format, output_file);
        }

        "render" => {
            if args.len() < 3 {
                eprintln!("Usage: {} render <layout_file> [--format text|binary]", args[0]);
                eprintln!("Error: Missing required argument");
                std::process::exit(1);
            }

            let mut format = OutputFormat::Text;
            if args.len() > 3 && args[3] == "--format" {
                if args.len() < 5 {
                    eprintln!("❌ Error: --format requires a value (json|text|binary)");
                    std::process::exit(1);
                }
                format = args[4].parse().unwrap_or_else(|e| {
                    eprintln!("❌ Error: {}", e);
                    std::process::exit(1);
                });
            }

            render_command(&args[2], format);
        }

        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: {} check <layout_file>", args[0]);
                eprintln!("Error: Missing required argument");
                std::process::exit(1);
            }

            check_command(&args[2]);
        }

        _ => {
            eprintln!("❌ Unknown command: {}", command);
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <command> [options]", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  generate [width] [height] [seed] [--format <format>] [output_file]");
    eprintln!("      Generate a perfect maze");
    eprintln!("      - width, height: Maze size in cells, clamped to 5..=25 (default 12)");
    eprintln!("      - seed: Integer seed; 0 or missing selects 12345");
    eprintln!("      - --format: Output format (json|text|binary), default json");
    eprintln!("      - output_file: Optional file to save the layout (JSON)");
    eprintln!();
    eprintln!("  render <layout_file> [--format <format>]");
    eprintln!("      Print a saved layout, default format text");
    eprintln!();
    eprintln!("  check <layout_file>");
    eprintln!("      Verify a saved layout is a perfect maze");
    eprintln!();
    eprintln!("Example workflow:");
    eprintln!("  1. Generate maze:  {} generate 12 12 42 maze.json", program);
    eprintln!("  2. Print it:       {} render maze.json", program);
    eprintln!("  3. Check it:       {} check maze.json", program);
}

fn generate_command(config: &MazeConfig, format: OutputFormat, output_file: Option<&str>) {
    let start = Instant::now();
    let layout = generate_maze(config);
    tracing::debug!("Generation time: {:?}", start.elapsed());

    match render_layout(&layout, format) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => {
            eprintln!("❌ Error rendering maze: {}", e);
            std::process::exit(1);
        }
    }

    if let Some(path) = output_file {
        match save_layout(&layout, path) {
            Ok(()) => eprintln!("💾 Maze layout saved to: {}", path),
            Err(e) => {
                eprintln!("❌ Error saving maze layout: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn render_command(layout_file: &str, format: OutputFormat) {
    let layout = match load_layout(layout_file) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("❌ Error loading maze layout: {}", e);
            std::process::exit(1);
        }
    };

    match render_layout(&layout, format) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => {
            eprintln!("❌ Error rendering maze: {}", e);
            std::process::exit(1);
        }
    }
}

fn check_command(layout_file: &str) {
    println!("📋 Checking maze layout");
    println!("  Layout file: {}", layout_file);
    println!();

    match load_layout(layout_file) {
        Ok(layout) => {
            println!("✅ Perfect maze!");
            println!("  Size: {}x{} cells", layout.safe_width, layout.safe_height);
            println!("  Seed: {}", layout.seed);
            println!("  Passages: {}", layout.safe_width * layout.safe_height - 1);
            println!("  Entrance: {:?}  Exit: {:?}", layout.entrance, layout.exit);
        }
        Err(e) => {
            eprintln!("❌ Layout check failed: {}", e);
            std::process::exit(1);
        }
    }
}
