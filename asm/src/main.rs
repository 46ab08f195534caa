use color_print::{cformat, cprintln};

use nesasm::directive::Includes;
use nesasm::label::collect_labels;
use nesasm::lexer::Lexer;
use nesasm::{assemble, parser, Options};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.asm")]
    input: String,

    /// Output file
    #[clap(short, long, default_value = "out.nes")]
    output: String,

    /// Emit the raw code stream without the iNES header
    #[clap(long)]
    raw: bool,

    /// Dump parsed statements and the symbol table
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    use clap::Parser;
    use std::io::Write;

    let args: Args = Args::parse();
    println!("NES 6502 Assembler");

    println!("1. Read File");
    println!("  < {}", args.input);
    let raw = std::fs::read(&args.input)
        .expect(&cformat!("<r,s>Failed to open File</>: {}", args.input));
    let code = String::from_utf8_lossy(&raw).into_owned();

    let opts = Options {
        ines: !args.raw,
        include_dir: std::path::Path::new(&args.input)
            .parent()
            .map(|p| p.to_path_buf()),
    };

    if args.dump {
        dump(&code);
    }

    println!("2. Assemble");
    let bin = match assemble(&code, &opts) {
        Ok(bin) => bin,
        Err(errors) => {
            for error in &errors {
                error.print_diag(&code);
            }
            cprintln!(
                "<red,bold>error</>: could not assemble `{}` ({} errors)",
                args.input,
                errors.len()
            );
            std::process::exit(1);
        }
    };

    println!("3. Write Binary");
    println!("  > {}", args.output);
    let mut file = std::fs::File::create(&args.output)
        .expect(&cformat!("<r,s>Failed to create File</>: {}", &args.output));
    file.write_all(&bin)
        .expect(&cformat!("<r,s>Failed to write File</>: {}", &args.output));
}

fn dump(code: &str) {
    let (tokens, _) = Lexer::new(code).scan();
    let (stmts, _) = parser::parse(&tokens);
    let mut includes = Includes::new(None);
    let labels = collect_labels(&stmts, &mut includes);

    println!("  - found #{} labels", labels.len());
    for (name, address) in labels.iter() {
        cprintln!("      <green>{}</>: <yellow>0x{:04X}</>", name, address);
    }
    for stmt in &stmts {
        let words = stmt
            .children
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        cprintln!("  <blue>{:<22}</> | {}", format!("{:?}", stmt.kind), words);
    }
}
