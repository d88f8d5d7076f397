use std::env;
use std::path::Path;
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use countersign::config::ScenarioConfig;
use countersign::Result;
use countersign::{Issuer, VerificationOutcome, Workflow};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        for cause in e.iter().skip(1) {
            eprintln!("  caused by: {}", cause);
        }
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cfg = match env::args().nth(1) {
        Some(path) => ScenarioConfig::load(Path::new(&path))?,
        None => ScenarioConfig::default(),
    };

    init_logging(&cfg.log_filter);
    info!(message = %cfg.message, "starting scenarios");

    let mut wf = Workflow::with_tamper_suffix(&cfg.tamper_suffix);
    let keys = wf.generate_keys()?;
    println!("{}", keys.public_armored);

    let sig = wf.sign(&cfg.message)?;
    println!("signature: {}", sig);

    wf.transfer_public_key()?;
    wf.import_held_key()?;
    report("happy path", &wf.verify()?);

    // Same signature, altered text
    wf.tamper_message();
    report("man in the middle", &wf.verify()?);

    // Untouched text, but the verifier trusts somebody else's key
    let mut stranger = Issuer::new();
    let stranger_key = stranger.generate_keys()?.public_armored.clone();
    wf.set_verifier_message(&cfg.message);
    wf.import_verifier_key(&stranger_key)?;
    report("wrong key", &wf.verify()?);

    // Garbage pasted into the signature box
    wf.transfer_public_key()?;
    wf.import_held_key()?;
    wf.set_verifier_signature("this is not base64!");
    report("bad signature text", &wf.verify()?);

    Ok(())
}

fn init_logging(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

fn report(scenario: &str, outcome: &VerificationOutcome) {
    println!("{:>20}: {}", scenario, outcome);
}
