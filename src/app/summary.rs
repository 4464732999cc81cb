use barrage::scheduler::TestConfig;

pub(crate) fn print_run_header(config: &TestConfig) {
    println!("Target: {}", config.url);
    println!(
        "Requests: {} | Concurrency: {} | Strategy: {}",
        config.total_requests,
        config.concurrency,
        config.strategy.as_str()
    );
    println!("Timeout: {:?}", config.timeout);
    match config.deadline() {
        Some(limit) => println!("Duration limit: {:?}", limit),
        None => println!("Duration limit: none"),
    }
    println!();
}

pub(crate) fn print_rendered(rendered: &str) {
    println!("{}", rendered);
}
