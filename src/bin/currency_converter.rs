use mimalloc::MiMalloc;
use tokio::sync::mpsc;
use tracing::{debug, info};
use triptych::TriptychError;
use triptych::config::CONFIG;
use triptych::console::{ConverterCommand, parse_converter, stdin_lines};
use triptych::converter::{ConverterApp, Currency, RateTable, build_client, fetch_rates};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const HELP: &str = "usd|eur|rub <amount>  type into a field
clear                 clear all fields
refresh               fetch rates again
show                  print the fields
quit                  exit";

type RatesResult = Result<RateTable, TriptychError>;

/// Fetch on a background task; the result comes back through `tx` and is
/// applied on the input loop.
fn spawn_refresh(client: reqwest::Client, tx: mpsc::Sender<RatesResult>) {
    let url = CONFIG.rates_url.clone();
    tokio::spawn(async move {
        let result = fetch_rates(&client, &url).await;
        let _ = tx.send(result).await;
    });
}

fn print_fields(app: &ConverterApp) {
    let fields = app.fields();
    for c in Currency::ALL {
        println!("{c}: {}", fields.get(c));
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cfg = &*CONFIG;
    triptych::logging::init(&cfg.loglevel);

    info!(
        rates_url = %cfg.rates_url,
        proxy = %cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
        loglevel = %cfg.loglevel
    );

    let client = build_client(cfg)?;
    let mut app = ConverterApp::new();
    app.signals_mut().rates_updated.connect(|table: &RateTable| {
        if let Some(r) = table.rate(Currency::Usd, Currency::Eur) {
            println!("rates updated: 1 USD = {r} EUR");
        }
    });

    let (tx, mut rx) = mpsc::channel::<RatesResult>(4);
    spawn_refresh(client.clone(), tx.clone());

    let mut lines = stdin_lines();
    println!("{HELP}");
    loop {
        tokio::select! {
            Some(result) = rx.recv() => {
                app.apply_refresh(result);
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let Some(cmd) = parse_converter(&line) else { continue };
                match cmd {
                    ConverterCommand::Edit { field, text } => {
                        for w in app.edit(field, &text) {
                            println!("{}: {}", w.field, w.text);
                        }
                    }
                    ConverterCommand::Clear => {
                        app.clear_clicked();
                        print_fields(&app);
                    }
                    ConverterCommand::Refresh => spawn_refresh(client.clone(), tx.clone()),
                    ConverterCommand::Show => print_fields(&app),
                    ConverterCommand::Help => println!("{HELP}"),
                    ConverterCommand::Quit => break,
                    ConverterCommand::Unknown(s) => {
                        debug!(input = %s, "unrecognised command");
                        println!("unknown command: {s}");
                    }
                }
            }
        }
    }
    Ok(())
}
