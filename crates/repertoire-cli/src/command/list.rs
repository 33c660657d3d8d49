use repertoire_engine::Side;

use super::BookArg;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ListArg {
    #[clap(flatten)]
    book: BookArg,
}

pub(crate) fn run(arg: &ListArg) -> anyhow::Result<()> {
    let book = arg.book.load()?;
    let id_width = book.lines().map(|line| line.id().len()).max().unwrap_or(0);
    let name_width = book.lines().map(|line| line.name().len()).max().unwrap_or(0);

    println!("{} openings:", book.len());
    for side in [Side::White, Side::Black] {
        let mut lines = book.lines_for(side).peekable();
        if lines.peek().is_none() {
            continue;
        }
        println!();
        println!("  Playing {side}:");
        for line in lines {
            println!(
                "    {:<id_width$}  {:<name_width$}  {:>3} positions, {:>2} plies deep",
                line.id(),
                line.name(),
                line.len(),
                line.depth(),
            );
        }
    }
    Ok(())
}
