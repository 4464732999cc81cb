mod app;
mod entry;
mod system;

use barrage::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
