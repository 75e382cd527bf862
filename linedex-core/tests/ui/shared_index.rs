use std::num::NonZeroUsize;
use std::sync::Arc;

use linedex_core::LineIndex;

fn assert_shareable<T: Send + Sync + 'static>(_: &T) {}

fn main() {
    let path = std::env::temp_dir().join(format!("linedex-ui-{}.txt", std::process::id()));
    std::fs::write(&path, "Alice\nBob\n").unwrap();

    let index = Arc::new(LineIndex::build(&path).unwrap());
    assert_shareable(&index);

    let reader = Arc::clone(&index);
    let lines = std::thread::spawn(move || reader.get_lines(1, NonZeroUsize::MIN).unwrap())
        .join()
        .unwrap();
    assert_eq!(lines, vec!["Bob"]);

    std::fs::remove_file(&path).unwrap();
}
