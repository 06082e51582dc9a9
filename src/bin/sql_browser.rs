use mimalloc::MiMalloc;
use tracing::{debug, info};
use triptych::browser::{Browser, ConnectionState, Surface};
use triptych::config::CONFIG;
use triptych::console::{
    BrowserCommand, ColumnChoice, format_grid, parse_browser, print_notices, stdin_lines,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const HELP: &str = "open <path>       Menu > Set connection
close             Menu > Close connection
b1 | b2 | b3      query buttons (Tab2, Tab4, Tab5)
run <query-id>    list-names | column-limit-10 | first-5-tables | first-3-schemas
columns           list the column dropdown
select <n|name>   pick a dropdown entry (fills Tab3)
show [tabN]       print one tab or all of them
quit              exit";

fn show(browser: &Browser, surface: Surface) {
    println!("== {surface} ==");
    println!("{}", format_grid(browser.grid(surface)));
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cfg = &*CONFIG;
    triptych::logging::init(&cfg.loglevel);
    info!(loglevel = %cfg.loglevel, "sql browser starting");

    let mut browser = Browser::new();
    let mut lines = stdin_lines();
    println!("{HELP}");

    while let Some(line) = lines.next_line().await? {
        let Some(cmd) = parse_browser(&line) else {
            continue;
        };
        match cmd {
            BrowserCommand::Open(path) => {
                print_notices(&browser.open_connection(&path).await);
                if browser.state() == ConnectionState::Open {
                    show(&browser, Surface::Tab1);
                }
            }
            BrowserCommand::Close => print_notices(&browser.close_connection().await),
            BrowserCommand::Run(query) => {
                let notices = browser.run_canned_query(query).await;
                print_notices(&notices);
                show(&browser, query.surface());
            }
            BrowserCommand::Select(choice) => {
                let index = match choice {
                    ColumnChoice::Index(i) => Some(i),
                    ColumnChoice::Name(name) => browser.selector().position(&name),
                };
                match index {
                    Some(i) => {
                        let notices = browser.select_column(i).await;
                        print_notices(&notices);
                        show(&browser, Surface::Tab3);
                    }
                    None => println!("no such column in the dropdown"),
                }
            }
            BrowserCommand::Columns => {
                for (i, item) in browser.selector().items().iter().enumerate() {
                    let mark = if i == browser.selector().current_index() { '*' } else { ' ' };
                    println!("{mark}{i}: {item}");
                }
            }
            BrowserCommand::Show(Some(surface)) => show(&browser, surface),
            BrowserCommand::Show(None) => {
                for surface in Surface::ALL {
                    show(&browser, surface);
                }
            }
            BrowserCommand::Help => println!("{HELP}"),
            BrowserCommand::Quit => break,
            BrowserCommand::Unknown(s) => {
                debug!(input = %s, "unrecognised command");
                println!("unknown command: {s}");
            }
        }
    }

    browser.close_connection().await;
    Ok(())
}
