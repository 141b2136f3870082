use block_bitmap::{Reply, Request, Session};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::num::NonZeroUsize;
use std::process::ExitCode;

const USAGE: &str = "\
Requires number of bits to generate bit map and number of columns.
The following example produces a bitmap with 25 addressable bits & 5 printable columns.
block_bitmap 25 5
The following example produces a bitmap with 81 addressable bits & 9 printable columns.
block_bitmap 81 9
Please note: the bitmap is stored in 32-bit blocks, so some allocated bits are usually unused.
To fill every allocated block, choose a bit count divisible by 32 (32, 64, 128, 256, etc.).
";

const INVALID_OPTION: &str =
    "Invalid option passed, please input an option between 1-6 or -1 to quit.";

/// Interactive exerciser for a fixed-capacity bitmap.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Number of addressable bits
    bits: usize,

    /// Number of columns used to print the bitmap
    columns: NonZeroUsize,
}

fn write_menu(out: &mut impl Write, session: &Session) -> io::Result<()> {
    writeln!(
        out,
        "This application was made to test the BitMap structure and how it operates."
    )?;
    writeln!(
        out,
        "The console expects 2 inputs at all times once the REPL loop begins: an option and a bit position."
    )?;
    writeln!(
        out,
        "The following value options are available to test the functionality of the BitMap structure:"
    )?;
    writeln!(out, "\t\t 1): SetBit")?;
    writeln!(out, "\t\t 2): ClearBit")?;
    writeln!(out, "\t\t 3): TestBit")?;
    writeln!(out, "\t\t 4): Invert BitMap")?;
    writeln!(out, "\t\t 5): Invert BitMap Column")?;
    writeln!(out, "\t\t 6): Invert BitMap Row")?;
    writeln!(out, "\t\t-1): Quit")?;
    match session.bitmap().bit_capacity().checked_sub(1) {
        Some(last) => writeln!(
            out,
            "The available addressable bits are within the range: 0-{last}."
        )?,
        None => writeln!(out, "The bitmap has no addressable bits.")?,
    }
    writeln!(
        out,
        "The invert bitmap option (4) ignores the bit position, which may be omitted."
    )?;
    writeln!(
        out,
        "The invert bitmap column option requires the option 5 and a column value within the range: 1-{}.",
        session.columns()
    )?;
    writeln!(
        out,
        "The invert bitmap row option requires the option 6 and a row value within the range: 1-{}.",
        session.rows()
    )?;
    writeln!(
        out,
        "An example to set the 0th bit within the bitmap would be to respond with \"1 0\" to the REPL."
    )?;
    writeln!(out, "In order to quit, respond with \"-1\" to the REPL.")?;
    writeln!(out)
}

fn run(session: &mut Session, mut input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "Total bits allocated: {}",
        session.bitmap().allocated_bits()
    )?;
    write_menu(out, session)?;

    let mut buf = Vec::new();
    loop {
        write!(out, "Option  Bit Position: ")?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            // end of input quits like option -1
            writeln!(out)?;
            return Ok(());
        }
        // undecodable bytes fail to parse below and are reported as an invalid option
        let line = String::from_utf8_lossy(&buf);
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Request>() {
            Ok(request) => match session.apply(request) {
                Reply::Quit => return Ok(()),
                Reply::Continue(status) if !status.is_silent() => writeln!(out, "{status}")?,
                Reply::Continue(_) => {}
            },
            Err(_) => writeln!(out, "{INVALID_OPTION}")?,
        }

        writeln!(out)?;
        write!(out, "{}", session.grid())?;
        writeln!(out)?;
    }
}

/// Parses the command line, returning the exit code to stop with on failure.
///
/// Argument errors print clap's diagnostic to stderr and the usage text to
/// `out`.
fn parse_cli<I, T>(args: I, out: &mut impl Write) -> io::Result<Result<Cli, u8>>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Ok(cli)),
        // --help and --version
        Err(err) if !err.use_stderr() => {
            err.print()?;
            Ok(Err(0))
        }
        Err(err) => {
            err.print()?;
            write!(out, "{USAGE}")?;
            Ok(Err(1))
        }
    }
}

fn main() -> io::Result<ExitCode> {
    let cli = match parse_cli(std::env::args_os(), &mut io::stdout().lock())? {
        Ok(cli) => cli,
        Err(code) => return Ok(ExitCode::from(code)),
    };

    let mut session = Session::new(cli.bits, cli.columns.get());
    run(&mut session, io::stdin().lock(), &mut io::stdout().lock())?;
    Ok(ExitCode::SUCCESS)
}
