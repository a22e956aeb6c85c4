use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = yfbx::cli::Cli::parse();
    let exit_code = yfbx::run(cli).await;
    std::process::exit(exit_code);
}
