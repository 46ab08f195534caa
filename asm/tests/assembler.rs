use nesasm::error::Error;
use nesasm::{assemble, Options};

fn raw(code: &str) -> Vec<u8> {
    assemble(
        code,
        &Options {
            ines: false,
            include_dir: None,
        },
    )
    .expect("assembly failed")
}

fn raw_errors(code: &str) -> Vec<Error> {
    assemble(
        code,
        &Options {
            ines: false,
            include_dir: None,
        },
    )
    .expect_err("assembly unexpectedly succeeded")
}

#[test]
fn minimal_program() {
    assert_eq!(raw(".org $8000\nLDA #$00\nRTS\n"), vec![0xA9, 0x00, 0x60]);
}

#[test]
fn label_resolves_to_statement_address() {
    // implicit origin 0: LABEL is the address of the LDA
    assert_eq!(
        raw("LABEL: LDA #$01\nJMP LABEL\n"),
        vec![0xA9, 0x01, 0x4C, 0x00, 0x00]
    );
}

#[test]
fn org_moves_labels() {
    assert_eq!(raw(".org $8000\nstart: JMP start\n"), vec![0x4C, 0x00, 0x80]);
}

#[test]
fn relative_branch_boundaries() {
    assert_eq!(raw("BNE $02\n"), vec![0xD0, 0x00]);
    assert_eq!(raw("BNE $01\n"), vec![0xD0, 0xFF]);
    assert_eq!(raw("BNE $03\n"), vec![0xD0, 0x01]);
}

#[test]
fn relative_branch_to_self() {
    assert_eq!(raw("loop: BNE loop\n"), vec![0xD0, 0xFE]);
}

#[test]
fn relative_branch_backward() {
    // BNE at 1 targeting 0: two bytes back past its own opcode
    assert_eq!(raw("loop: NOP\nBNE loop\n"), vec![0xEA, 0xD0, 0xFD]);
}

#[test]
fn modifier_splits_address() {
    assert_eq!(
        raw(".org $8000\nLDA #LOW($1234)\nLDX #HIGH($1234)\n"),
        vec![0xA9, 0x34, 0xA2, 0x12]
    );
}

#[test]
fn zeropage_wins_over_absolute() {
    assert_eq!(
        raw("LDA $10\nLDA $0010\n"),
        vec![0xA5, 0x10, 0xAD, 0x10, 0x00]
    );
}

#[test]
fn indexed_and_indirect_modes() {
    assert_eq!(
        raw("LDA $10,X\nLDA $0200,Y\nLDA ($20,X)\nLDA [$20],Y\n"),
        vec![0xB5, 0x10, 0xB9, 0x00, 0x02, 0xA1, 0x20, 0xB1, 0x20]
    );
}

#[test]
fn db_and_dw_emit_literals() {
    assert_eq!(
        raw(".db $01, $02, 128\n.dw $1234\n"),
        vec![0x01, 0x02, 0x80, 0x34, 0x12]
    );
}

#[test]
fn db_advances_label_addresses() {
    assert_eq!(
        raw(".db $01, $02\nlab: RTS\nJMP lab\n"),
        vec![0x01, 0x02, 0x60, 0x4C, 0x02, 0x00]
    );
}

#[test]
fn reservations_use_their_own_counter() {
    assert_eq!(
        raw(".rsset $0300\nSPRITE .rs 2\nBALL .rs 1\nLDA SPRITE\nLDA BALL\n"),
        vec![0xAD, 0x00, 0x03, 0xAD, 0x02, 0x03]
    );
}

#[test]
fn bank_directive_is_accepted() {
    assert_eq!(raw(".bank 1\nRTS\n"), vec![0x60]);
}

#[test]
fn ines_image() {
    let code = "\
.inesprg 1
.ineschr 1
.inesmap 0
.inesmir 1
.org $8000
LDA #$00
RTS
";
    let image = assemble(code, &Options::default()).expect("assembly failed");
    assert_eq!(image.len(), 16 + 16 * 1024 + 8 * 1024);
    assert_eq!(
        &image[..16],
        &[0x4E, 0x45, 0x53, 0x1A, 1, 1, 0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    );
    assert_eq!(&image[16..19], &[0xA9, 0x00, 0x60]);
    assert!(image[19..].iter().all(|&b| b == 0));
}

#[test]
fn ines_requires_prg_bank_count() {
    let errors = assemble(".org $8000\nRTS\n", &Options::default()).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], Error::MissingHeaderField(".inesprg")));
}

#[test]
fn raw_output_has_no_header() {
    // container framing disabled: exactly the three encoded bytes
    let bin = raw(".org $8000\nLDA #$00\nRTS\n");
    assert_eq!(bin.len(), 3);
}

#[test]
fn unknown_directive() {
    let errors = raw_errors(".foo 1\nRTS\n");
    assert_eq!(errors.len(), 1);
    assert!(matches!(&errors[0], Error::UnknownDirective(name) if name == ".foo"));
}

#[test]
fn invalid_opcode_does_not_abort() {
    let errors = raw_errors("STA #$01\nTAX $0200\n");
    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[0], Error::InvalidOpcode { .. }));
    assert!(matches!(errors[1], Error::InvalidOpcode { .. }));
}

#[test]
fn undefined_label() {
    let errors = raw_errors("JMP nowhere\n");
    assert_eq!(errors.len(), 1);
    assert!(matches!(&errors[0], Error::UndefinedLabel(name) if name == "nowhere"));
}

#[test]
fn errors_from_every_stage_aggregate() {
    let errors = raw_errors("&&&\n) )\nSTA #$01\n");
    assert_eq!(errors.len(), 3);
    assert!(matches!(errors[0], Error::InvalidToken { .. }));
    assert!(matches!(errors[1], Error::InvalidSyntax { .. }));
    assert!(matches!(errors[2], Error::InvalidOpcode { .. }));
}

#[test]
fn incbin_uses_true_file_size() {
    let dir = std::env::temp_dir().join(format!("nesasm-incbin-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("blob.bin"), [1u8, 2, 3, 4, 5]).unwrap();

    let bin = assemble(
        ".incbin \"blob.bin\"\nlab: RTS\nJMP lab\n",
        &Options {
            ines: false,
            include_dir: Some(dir.clone()),
        },
    )
    .expect("assembly failed");
    // lab sits right after the five included bytes
    assert_eq!(bin, vec![1, 2, 3, 4, 5, 0x60, 0x4C, 0x05, 0x00]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn incbin_missing_file() {
    let errors = raw_errors(".incbin \"nope.bin\"\n");
    assert_eq!(errors.len(), 1);
    assert!(matches!(&errors[0], Error::IncludeNotFound(name) if name == "nope.bin"));
}

#[test]
fn multiple_labels_bind_to_same_address() {
    assert_eq!(
        raw("aa:\nbb: RTS\nJMP aa\nJMP bb\n"),
        vec![0x60, 0x4C, 0x00, 0x00, 0x4C, 0x00, 0x00]
    );
}
