use clap::Parser;
use railshape::app::shape_app::ShapeOperation;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct ShapeAppArguments {
    #[command(subcommand)]
    op: ShapeOperation,
}

fn main() {
    env_logger::init();
    let args = ShapeAppArguments::parse();
    if let Err(e) = args.op.run() {
        log::error!("railshape failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
