use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = callscribe_api::Args::parse();

	callscribe_api::run(args).await
}
