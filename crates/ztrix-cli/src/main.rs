mod command;
mod driver;
mod logging;
mod schema;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
