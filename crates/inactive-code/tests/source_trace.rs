use inactive_code::{
    DirectiveKind, DirectiveRecord, FileId, HighlightLayers, InactiveCodeConfig,
    InactiveCodeProcessor, PositionConverter, StyleLayerId, TextDelta, TextDeltaEdit,
    extract_inactive_ranges,
};
use pretty_assertions::assert_eq;

const SOURCE: &str = "\
#ifndef PLATFORM_H
#define PLATFORM_H
#include \"config.h\"
#ifdef _WIN32
#include <windows.h>
#else
#include <unistd.h>
#endif
#if HAVE_THREADS
#if USE_PTHREADS
#include <pthread.h>
#elif USE_C11_THREADS
#include <threads.h>
#endif
#endif
#endif
";

/// Locate the `nth` line reading exactly `text` and build a record for it.
fn directive(kind: DirectiveKind, text: &str, nth: usize, taken: bool) -> DirectiveRecord {
    let mut offset = 0;
    let mut seen = 0;
    for line in SOURCE.split_inclusive('\n') {
        if line.trim_end() == text {
            if seen == nth {
                return DirectiveRecord::new(
                    kind,
                    FileId::new("platform.h"),
                    offset,
                    text.len(),
                    taken,
                );
            }
            seen += 1;
        }
        offset += line.len();
    }
    panic!("directive {text:?} not found");
}

/// The trace a parser would report for a Linux build without thread support, including the
/// directives of `config.h` (a different file) in inclusion order.
fn linux_trace() -> Vec<DirectiveRecord> {
    let config = FileId::new("config.h");
    vec![
        directive(DirectiveKind::Ifndef, "#ifndef PLATFORM_H", 0, true),
        DirectiveRecord::new(DirectiveKind::Ifndef, config.clone(), 0, 16, true),
        DirectiveRecord::new(DirectiveKind::If, config.clone(), 40, 10, false),
        DirectiveRecord::new(DirectiveKind::Endif, config.clone(), 80, 6, false),
        DirectiveRecord::new(DirectiveKind::Endif, config, 120, 6, false),
        directive(DirectiveKind::Ifdef, "#ifdef _WIN32", 0, false),
        directive(DirectiveKind::Else, "#else", 0, true),
        directive(DirectiveKind::Endif, "#endif", 0, false),
        directive(DirectiveKind::If, "#if HAVE_THREADS", 0, false),
        directive(DirectiveKind::If, "#if USE_PTHREADS", 0, false),
        directive(DirectiveKind::Elif, "#elif USE_C11_THREADS", 0, false),
        directive(DirectiveKind::Endif, "#endif", 1, false),
        directive(DirectiveKind::Endif, "#endif", 2, false),
        directive(DirectiveKind::Endif, "#endif", 3, false),
    ]
}

fn covered_text(layers: &HighlightLayers) -> Vec<&'static str> {
    layers
        .layer(StyleLayerId::INACTIVE_CODE)
        .iter()
        .map(|interval| &SOURCE[interval.start..interval.end])
        .collect()
}

#[test]
fn test_platform_header_inactive_regions() {
    let file = FileId::new("platform.h");
    let trace = linux_trace();

    let ranges = extract_inactive_ranges(&trace, &file);
    assert_eq!(ranges.len(), 2);

    let mut layers = HighlightLayers::new();
    let processor = InactiveCodeProcessor::new(InactiveCodeConfig::default());
    layers.apply_processing_edits([processor.process(Some(trace.as_slice()), &file, None)]);

    assert_eq!(
        covered_text(&layers),
        vec![
            "#ifdef _WIN32\n#include <windows.h>\n#else",
            "#if HAVE_THREADS\n#if USE_PTHREADS\n#include <pthread.h>\n\
             #elif USE_C11_THREADS\n#include <threads.h>\n#endif\n#endif",
        ]
    );

    let unistd = SOURCE.find("<unistd.h>").unwrap();
    assert!(!layers.is_styled(StyleLayerId::INACTIVE_CODE, unistd));
}

#[test]
fn test_trace_survives_json_boundary() {
    let file = FileId::new("platform.h");
    let trace = linux_trace();

    let json = serde_json::to_string(&trace).unwrap();
    let decoded: Vec<DirectiveRecord> = serde_json::from_str(&json).unwrap();

    assert_eq!(
        extract_inactive_ranges(&decoded, &file),
        extract_inactive_ranges(&trace, &file)
    );
}

#[test]
fn test_ranges_follow_later_edits() {
    let file = FileId::new("platform.h");
    let trace = linux_trace();

    // A comment line was typed at the top of the file after the parse started.
    let delta = TextDelta::new(
        SOURCE.chars().count(),
        vec![TextDeltaEdit::new(0, "", "// generated\n")],
    );
    let edited = format!("// generated\n{SOURCE}");

    let processor = InactiveCodeProcessor::default();
    let ranges = processor.inactive_ranges(
        Some(trace.as_slice()),
        &file,
        Some(&delta as &dyn PositionConverter),
    );

    assert_eq!(ranges.len(), 2);
    assert_eq!(
        &edited[ranges[0].offset..ranges[0].end()],
        "#ifdef _WIN32\n#include <windows.h>\n#else"
    );
}
