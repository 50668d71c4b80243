use criterion::{criterion_group, criterion_main, Criterion};

use std::fs;

use ghost_lang::compiler::parse;

pub fn benchmark_compiler(c: &mut Criterion) {
    const DIR: &str = "./benches/scripts";
    for dir in fs::read_dir(DIR).expect("could not list dir") {
        let path = dir.expect("could not read dir entry").path();
        if path.extension().is_some_and(|ext| ext == "ghost") {
            let input = &fs::read_to_string(&path).expect("could not read file contents");
            c.bench_function(
                &format!("parse {}", path.file_name().unwrap().to_str().unwrap()),
                |b| {
                    b.iter(|| {
                        let (program, lex_errors, parse_errors) = parse(input);
                        assert!(lex_errors.is_empty() && parse_errors.is_empty());
                        program
                    })
                },
            );
        }
    }
}

criterion_group!(compiler, benchmark_compiler);
criterion_main!(compiler);
