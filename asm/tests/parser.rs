use nesasm::lexer::Lexer;
use nesasm::parser::{self, Stmt, StmtKind};

fn parse(code: &str) -> (Vec<Stmt>, Vec<nesasm::error::Error>) {
    let (tokens, lex_errors) = Lexer::new(code).scan();
    assert!(lex_errors.is_empty(), "lexical errors: {:?}", lex_errors);
    parser::parse(&tokens)
}

fn kinds(code: &str) -> Vec<StmtKind> {
    let (stmts, errors) = parse(code);
    assert!(errors.is_empty(), "syntax errors: {:?}", errors);
    stmts.iter().map(|s| s.kind).collect()
}

macro_rules! case {
    ($name:ident, $code:expr, $($kind:ident)+) => {
        #[test]
        fn $name() {
            assert_eq!(kinds($code), vec![$(StmtKind::$kind),+]);
        }
    };
}

case!(implied, "TAX\n", Implied);
case!(implied_sequence, "NOP\nTAX\nRTS\n", Implied Implied Implied);
case!(accumulator, "ASL A\n", Accumulator);
case!(immediate_hex, "LDA #$10\n", Immediate);
case!(immediate_binary, "LDA #%00000001\n", Immediate);
case!(immediate_decimal, "LDA 10\n", Immediate);
case!(immediate_with_modifier, "LDA #LOW($1234)\n", ImmediateWithModifier);
case!(relative_to_marker, "BNE loop\nloop: NOP\n", Relative Implied);
case!(relative_to_address, "BEQ $02\n", Relative);
case!(zeropage, "LDA $10\n", ZeroPage);
case!(zeropage_x, "LDA $10,X\n", ZeroPageX);
case!(zeropage_y, "LDX $10,Y\n", ZeroPageY);
case!(absolute, "LDA $0200\n", Absolute);
case!(absolute_marker, "JMP start\nstart: RTS\n", Absolute Implied);
case!(absolute_x, "LDA $0200,X\n", AbsoluteX);
case!(absolute_y, "LDA $0200,Y\n", AbsoluteY);
case!(indirect_x, "LDA ($20,X)\n", IndirectX);
case!(indirect_y, "LDA ($20),Y\n", IndirectY);
case!(indirect_brackets, "LDA [$20,X]\nLDA [$20],Y\n", IndirectX IndirectY);
case!(directive, ".org $8000\n", Directive);
case!(directive_list, ".db $01, $02, $03\n", Directive);
case!(reservation, "SPRITE .rs 1\n", Rs);
case!(mixed, ".inesprg 1\nstart: SEI\nJMP start\n", Directive Implied Absolute);

#[test]
fn list_children_include_separators() {
    let (stmts, errors) = parse(".db $01, $02, $03\n");
    assert!(errors.is_empty());
    assert_eq!(stmts[0].children.len(), 6); // .db $01 , $02 , $03
}

#[test]
fn pending_labels_attach_in_order() {
    let (stmts, errors) = parse("first:\nsecond: LDA #$00\nNOP\n");
    assert!(errors.is_empty());
    assert_eq!(stmts[0].labels, vec!["first", "second"]);
    assert!(stmts[1].labels.is_empty());
}

#[test]
fn collects_multiple_syntax_errors() {
    let (stmts, errors) = parse(", $01\n) )\nNOP\n");
    assert_eq!(errors.len(), 2);
    // the good line still parsed
    assert_eq!(stmts.len(), 1);
    assert_eq!(stmts[0].kind, StmtKind::Implied);
}

#[test]
fn error_span_reports_position() {
    let (_, errors) = parse("NOP\n) )\n");
    match &errors[0] {
        nesasm::error::Error::InvalidSyntax { line, found, .. } => {
            assert_eq!(*line, 2);
            assert_eq!(found, ") )");
        }
        e => panic!("unexpected error: {:?}", e),
    }
}
