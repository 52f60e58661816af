use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = callscribe_worker::Args::parse();

	callscribe_worker::run(args).await
}
