mod entry;
mod logger;

use callbench::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
