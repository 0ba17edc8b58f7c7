use optable::{build, build_file, render, Error, Format, Layout, OpcodeTable, DEFAULT_SENTINEL};

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn table_from(src: &str) -> OpcodeTable {
    let mut table = OpcodeTable::default();
    build(src.lines(), &mut table);
    table
}

#[test]
fn test_call_and_halt() {
    let table = table_from(
        "/* 00e_ call\n  chip8_call(p)\n*/\n/* ffff halt\n  chip8_halt(p)\n*/\n",
    );
    for code in 0..=0xFFFF_u16 {
        let expect = match code {
            0x00E0..=0x00EF => "chip8_call",
            0xFFFF => "chip8_halt",
            _ => DEFAULT_SENTINEL,
        };
        assert_eq!(table.get(code).as_str(), expect, "slot 0x{:04X}", code);
    }
    assert_eq!(table.assigned_count(), 17);
}

macro_rules! test_order {
    ($($name:ident: $first:expr, $second:expr => $winner:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let src = format!(
                    "/* {} first\n  chip8_first(p)\n*/\n/* {} second\n  chip8_second(p)\n*/\n",
                    $first, $second
                );
                let table = table_from(&src);
                assert_eq!(table.get(0x1234).as_str(), $winner);
            }
        )*
    }
}

test_order! {
    test_exact_then_wildcard: "1234", "1xy4" => "chip8_second",
    test_wildcard_then_exact: "1xy4", "1234" => "chip8_second",
    test_whole_space_last: "1234", "nnnn" => "chip8_second",
    test_whole_space_first: "____", "12k4" => "chip8_second",
    test_disjoint: "1234", "1235" => "chip8_first",
}

#[test]
fn test_collisions_reported_in_order() {
    let src = "/* 12_4 a\n  chip8_a(p)\n*/\n/* 1234 b\n  chip8_b(p)\n*/\n";
    let mut table = OpcodeTable::new(DEFAULT_SENTINEL).track_collisions();
    build(src.lines(), &mut table);
    let collisions = table.collisions();
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].code, 0x1234);
    assert_eq!(collisions[0].previous.as_str(), "chip8_a");
    assert_eq!(collisions[0].current.as_str(), "chip8_b");
}

#[test]
fn test_bad_pattern_does_not_stop_the_run() {
    let src = "/* 1nnnn too long\n  chip8_bad(p)\n*/\n/* zz00 odd\n  chip8_odd(p)\n*/\n/* 00ee ret\n  chip8_ret(p)\n*/\n";
    let mut table = OpcodeTable::default();
    let report = build(src.lines(), &mut table);
    assert_eq!(report.rejected.len(), 2);
    assert!(matches!(report.rejected[0].1, Error::PatternLength(_, 5)));
    assert!(matches!(report.rejected[1].1, Error::UnrecognizedPattern(_, 'z')));
    assert_eq!(report.accepted.len(), 1);
    assert_eq!(table.get(0x00EE).as_str(), "chip8_ret");
    assert_eq!(table.assigned_count(), 1);
}

#[test]
fn test_handler_header() {
    let mut table = OpcodeTable::default();
    let report = build_file(&fixture("chip8_impl.h"), &mut table).unwrap();

    assert_eq!(report.accepted.len(), 34);
    // The typedef note and the callback's own comment carry no pattern
    assert_eq!(report.rejected.len(), 2);
    assert!(report.incomplete.is_empty());

    assert_eq!(table.get(0x00E0).as_str(), "chip8_clear_screen");
    assert_eq!(table.get(0x00EE).as_str(), "chip8_subroutine_return");
    assert_eq!(table.get(0x1ABC).as_str(), "chip8_jump");
    assert_eq!(table.get(0x8A34).as_str(), "chip8_addvxvy");
    assert_eq!(table.get(0x8A3E).as_str(), "chip8_shlvx");
    assert_eq!(table.get(0x8A38).as_str(), DEFAULT_SENTINEL);
    // Multi-line descriptions, with and without parentheses
    assert_eq!(table.get(0xD123).as_str(), "chip8_draw");
    assert_eq!(table.get(0x8A36).as_str(), "chip8_shrvx");
    assert_eq!(table.get(0xE59E).as_str(), "chip8_skipkeydown");
    assert_eq!(table.get(0xF729).as_str(), "chip8_digisprite");
    assert_eq!(table.get(0x0123).as_str(), DEFAULT_SENTINEL);

    assert_eq!(table.assigned_count(), 43954);
    assert_eq!(report.written(), 43954);
}

#[test]
fn test_parenthesised_prose_keeps_declared_handler() {
    let table = table_from(
        "/*\ndxyn draws a sprite\nat position (vx, vy) of height n\n*/\nvoid chip8_draw(chip8_t* chip, opcode_params_t* params);\n",
    );
    assert_eq!(table.get(0xD123).as_str(), "chip8_draw");
    assert_eq!(table.assigned_count(), 4096);
}

#[test]
fn test_missing_file() {
    let mut table = OpcodeTable::default();
    let err = build_file(&fixture("missing.h"), &mut table).unwrap_err();
    assert!(matches!(err, Error::FileOpen(_, _)));
    assert!(err.is_fatal());
}

#[test]
fn test_render_header() {
    let mut table = OpcodeTable::default();
    build_file(&fixture("chip8_impl.h"), &mut table).unwrap();
    let out = render(&table, Format::C, &Layout::default());
    let inner = out
        .trim_end()
        .strip_prefix("static void (*opcode_table[65536]) (chip8_t*,opcode_params_t*) = {")
        .and_then(|s| s.strip_suffix("};"))
        .unwrap();
    let names: Vec<&str> = inner.split(',').collect();
    assert_eq!(names.len(), 65536);
    assert_eq!(names[0x00E0], "chip8_clear_screen");
    assert_eq!(names[0x0000], "chip8_uic");
}
