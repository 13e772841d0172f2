use std::fs;

use rpal::get_result;
use walkdir::WalkDir;

/// Runs every `.rpal` program under `tests/programs/` and compares its
/// output against the sibling `.out` file, byte for byte.
#[test]
fn corpus_programs_match_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| {
                                          e.path().extension().is_some_and(|ext| ext == "rpal")
                                      })
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                           panic!("Failed to read {expected_path:?}: {e}")
                       });

        let mut out = Vec::new();
        if let Err(e) = get_result(&source, &mut out) {
            panic!("Program {path:?} failed:\n{source}\nError: {e}");
        }
        let output = String::from_utf8(out).expect("program output is UTF-8");

        assert_eq!(output, expected, "program {path:?}");
        count += 1;
    }

    assert!(count > 0, "No programs found in tests/programs");
}
