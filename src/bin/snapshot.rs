use std::path::PathBuf;

use wpnote::{
    access::ContentAccess, config::Config, snapshot::write_snapshot, source::WordPressSource,
};

fn print_usage_and_exit() -> ! {
    eprintln!("Usage: snapshot <out_dir>");
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    let mut args = std::env::args().skip(1); // 跳过程序名

    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| {
        eprintln!("Missing <out_dir>");
        print_usage_and_exit();
    });

    if args.next().is_some() {
        eprintln!("Too many arguments provided.");
        print_usage_and_exit();
    }

    wpnote::init_tracing();

    let source = match Config::from_env().and_then(|config| WordPressSource::new(&config)) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    match write_snapshot(&ContentAccess::new(source), &out_dir).await {
        Ok(snapshot) => {
            println!(
                "✅ {} posts listed, {} pages written to {}",
                snapshot.summaries,
                snapshot.pages,
                out_dir.display()
            );
        }
        Err(e) => {
            eprintln!("❌ Failed to write snapshot: {}", e);
            std::process::exit(1);
        }
    }
}
