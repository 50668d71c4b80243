use std::{
    cell::RefCell,
    fs,
    io::{self, stdout, Write},
    rc::Rc,
};

use ghost_lang::Ghost;

#[derive(Clone, Default)]
struct Output(Rc<RefCell<Vec<u8>>>);

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs every script and compares what it prints with the `.out` file next
/// to it.
#[test]
fn test_scripts() {
    const DIR: &str = "./tests/scripts";
    let _ = writeln!(stdout(), "running all test scripts in {:?}", DIR);
    for dir in fs::read_dir(DIR).expect("could not list dir") {
        let path = dir.expect("could not read dir entry").path();
        if path.extension().is_some_and(|ext| ext == "ghost") {
            let input = fs::read_to_string(&path).expect("could not read file contents");
            let expected = fs::read_to_string(path.with_extension("out"))
                .expect("could not read expected output");
            let _ = writeln!(stdout(), "running {:?}", path.file_name().unwrap());
            let output = Output::default();
            let mut ghost = Ghost::with_output(output.clone());
            ghost.set_file(path.to_string_lossy());
            if let Err(err) = ghost.run(&input) {
                panic!("error encountered running {:?}: {}", path, err);
            }
            let actual = String::from_utf8(output.0.borrow().clone()).unwrap();
            assert_eq!(actual, expected, "output of {:?}", path);
        } else {
            let _ = writeln!(stdout(), "skipping file {:?}", path);
        }
    }
}
