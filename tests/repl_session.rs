use safecalc::cli::Config;
use safecalc::line_mode::run_with;
use safecalc::session::Session;
use safecalc::{evaluate_expression, format_result, EvalError};

fn transcript(script: &str, history_limit: usize) -> String {
    let mut session = Session::new(Config {
        history_limit,
        ..Config::default()
    });
    let mut out = Vec::new();
    run_with(&mut session, script.as_bytes(), &mut out).expect("repl run");
    String::from_utf8(out).expect("utf8 output")
}

#[test]
fn full_session() {
    let out = transcript(
        "help\n\
         sin(pi/2) + cos(0)\n\
         sqrt(abs(-16)) * pi\n\
         os.system(1)\n\
         foo(2)\n\
         round(2.5)\n\
         history\n\
         exit\n",
        2,
    );

    assert!(out.contains("=== Calculator Help ==="));
    assert!(out.contains("calc> 2\n"));
    assert!(out.contains("calc> 12.56637061\n"));
    assert!(out.contains("calc> Error: Syntax error: "));
    assert!(out.contains("calc> Error: Unknown function 'foo'"));
    // only the last two successes are listed
    assert!(out.contains(" 1. sqrt(abs(-16)) * pi = 12.56637061\n"));
    assert!(out.contains(" 2. round(2.5) = 2\n"));
    assert!(!out.contains(". sin(pi/2) + cos(0) ="));
}

#[test]
fn one_shot_api_matches_documented_behaviour() {
    assert_eq!(evaluate_expression("2 + 3 * 4").map(format_result), Ok("14".to_string()));
    assert_eq!(evaluate_expression("sqrt(16)").map(format_result), Ok("4".to_string()));
    assert_eq!(evaluate_expression("10 / 0"), Err(EvalError::DivisionByZero));
    assert!(matches!(evaluate_expression("sqrt(-1)"), Err(EvalError::Domain(_))));
    assert_eq!(
        evaluate_expression("10 / 0").map_err(|e| e.to_string()),
        Err("Division by zero".to_string())
    );
}

#[test]
fn errors_do_not_end_the_loop() {
    let out = transcript("1/0\nlog(0)\n)\n2**0.5\n", 10);
    assert!(out.contains("Error: Division by zero"));
    assert!(out.contains("Error: Math domain error: log: argument must be positive"));
    assert!(out.contains("calc> 1.414213562\n"));
}

#[test]
fn one_shot_exit_statuses() {
    use safecalc::one_shot::one_shot;

    let mut out = Vec::new();
    assert_eq!(one_shot("2 + 3 * 4", &mut out).expect("write"), 0);
    assert_eq!(one_shot("10 / 0", &mut out).expect("write"), 1);
    assert_eq!(one_shot("import os", &mut out).expect("write"), 1);
    let out = String::from_utf8(out).expect("utf8 output");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "14");
    assert_eq!(lines[1], "Error: Division by zero");
    assert!(lines[2].starts_with("Error: Syntax error: "));
}
