use mimalloc::MiMalloc;
use tracing::{debug, info};
use triptych::config::CONFIG;
use triptych::console::{ViewerCommand, parse_viewer, print_notices, stdin_lines};
use triptych::viewer::{PaintOp, Size, Viewer, WindowFit};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const HELP: &str = "button1 | toggle       toggle the label
button2 | load <path>  pick a background image
paint <w> <h>          describe how a w x h window is painted
quit                   exit";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cfg = &*CONFIG;
    triptych::logging::init(&cfg.loglevel);

    let screen = Size::new(cfg.screen_width, cfg.screen_height);
    info!(
        screen_width = screen.width,
        screen_height = screen.height,
        opacity = cfg.background_opacity,
        "viewer starting"
    );

    let mut viewer = Viewer::new(screen, cfg.background_opacity);
    let mut lines = stdin_lines();
    println!("{HELP}");
    println!("label: {}", viewer.label());

    while let Some(line) = lines.next_line().await? {
        let Some(cmd) = parse_viewer(&line) else {
            continue;
        };
        match cmd {
            ViewerCommand::ToggleLabel => println!("label: {}", viewer.toggle_label()),
            ViewerCommand::Load(path) => {
                let (fit, notices) = viewer.load_background(&path);
                print_notices(&notices);
                match fit {
                    Some(WindowFit::Maximize) => {
                        println!("window: maximized ({}x{})", screen.width, screen.height);
                    }
                    Some(WindowFit::Resize(size)) => {
                        println!("window: {}x{}", size.width, size.height);
                    }
                    None => {}
                }
            }
            ViewerCommand::Paint { width, height } => {
                match viewer.paint_plan(Size::new(width, height)) {
                    PaintOp::Fill(rgb) => println!("fill rgb({}, {}, {})", rgb.0, rgb.1, rgb.2),
                    PaintOp::Image { size, opacity } => println!(
                        "draw image {}x{} at (0, 0), opacity {opacity}",
                        size.width, size.height
                    ),
                }
            }
            ViewerCommand::Help => println!("{HELP}"),
            ViewerCommand::Quit => break,
            ViewerCommand::Unknown(s) => {
                debug!(input = %s, "unrecognised command");
                println!("unknown command: {s}");
            }
        }
    }
    Ok(())
}
