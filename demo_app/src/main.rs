mod controllers;

fn main() -> anyhow::Result<()> {
    brrtmvc::cli::run()
}
