use clap::Parser;
use env_logger::Env;

use pgprobe::cli::{self, Cli};
use pgprobe::probe::Prober;
use pgprobe::report;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    std::process::exit(run(cli).await);
}

async fn run(mut cli: Cli) -> i32 {
    let url = match cli.url.take() {
        Some(url) => {
            if !cli::is_postgres_url(&url) {
                eprintln!("error: not a PostgreSQL URL (expected postgres:// or postgresql://)");
                return 2;
            }
            url
        }
        None => match cli::prompt_for_url() {
            Some(url) => url,
            None => return 2,
        },
    };

    let info = match pgprobe::url::decompose(&url) {
        Ok(info) => info,
        Err(e) => {
            eprintln!("error: {}", e);
            return 1;
        }
    };

    if cli.parse_only {
        return match emit(&cli, &info, None) {
            Ok(()) => 0,
            Err(code) => code,
        };
    }

    if !cli.json {
        print!("{}", report::render_connection_info(&info));
        println!("\nTesting connection...");
    }

    let result = Prober::new().probe(&info).await;

    if let Err(code) = emit(&cli, &info, Some(&result)) {
        return code;
    }

    if result.connection_successful {
        0
    } else {
        1
    }
}

fn emit(
    cli: &Cli,
    info: &pgprobe::models::ConnectionInfo,
    result: Option<&pgprobe::models::ConnectionTestResult>,
) -> Result<(), i32> {
    if cli.json {
        match report::render_json(info, result) {
            Ok(doc) => println!("{}", doc),
            Err(e) => {
                eprintln!("error: failed to serialize report: {}", e);
                return Err(1);
            }
        }
    } else {
        match result {
            Some(result) => print!("{}", report::render_test_results(result)),
            None => print!("{}", report::render_connection_info(info)),
        }
    }
    Ok(())
}
