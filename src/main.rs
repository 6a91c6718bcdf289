// src/main.rs

use i2p::errors::I2pError;
use i2p::{cli, logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = logging::init_logging() {
        eprintln!("i2p error: {err:?}");
        std::process::exit(1);
    }

    let args = match cli::parse() {
        Ok(args) => args,
        Err(err) => {
            report(&err);
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args).await {
        report(&err);
        // Fatal path: no cleanup beyond what `run` already did.
        std::process::exit(1);
    }
}

fn report(err: &I2pError) {
    match err {
        I2pError::Usage { .. } => print!("{err}"),
        I2pError::NoInput => println!("{err}"),
        _ => eprintln!("{err}"),
    }
}
