use std::{
    io::Write,
    process::{Command, Stdio},
    thread,
    time::Duration,
};

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn replay_reaches_goal_placed_in_a_tiny_open_maze() {
    // A 1x1 maze leaves a single free cell, so player and goal share it.
    let config = write_temp("width = 1\nheight = 1\nwalls = []\n");
    let track = write_temp("0 0\n");

    let output = Command::new(env!("CARGO_BIN_EXE_neck-maze"))
        .args(["--seed", "1", "--frame-millis", "250", "--columns", "1", "--rows", "1"])
        .arg("--config")
        .arg(config.path())
        .arg("--signals")
        .arg(track.path())
        .output()
        .expect("run neck-maze");

    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    assert!(stdout.contains("You Win! Time: 0.25s"), "{stdout}");
}

#[test]
fn blocked_maze_fails_to_start() {
    let config = write_temp(
        "width = 3\nheight = 3\n\n[[walls]]\nstart = { x = 1, y = 1 }\nend = { x = 1, y = 1 }\n",
    );
    let track = write_temp("-\n");

    let output = Command::new(env!("CARGO_BIN_EXE_neck-maze"))
        .arg("--config")
        .arg(config.path())
        .arg("--signals")
        .arg(track.path())
        .output()
        .expect("run neck-maze");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    assert!(stderr.contains("maze has no navigable free space"), "{stderr}");
}

#[test]
fn piped_detector_is_timed_in_real_time() {
    let config =
        write_temp("width = 2\nheight = 1\nwalls = []\nplayer_radius = 1\ngoal_radius = 0\n");

    let mut child = Command::new(env!("CARGO_BIN_EXE_neck-maze"))
        .args(["--seed", "3", "--no-mirror", "--columns", "2", "--rows", "1"])
        .arg("--config")
        .arg(config.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn neck-maze");

    // The clock starts once the binary is up, so leave headroom for startup.
    let mut stdin = child.stdin.take().expect("piped stdin");
    thread::sleep(Duration::from_millis(600));
    stdin.write_all(b"0 0\n").expect("write sample");
    stdin.flush().expect("flush sample");
    thread::sleep(Duration::from_millis(200));
    // The session may already be over, so a closed pipe is fine here.
    let _ = stdin.write_all(b"1 0\n");
    drop(stdin);

    let output = child.wait_with_output().expect("wait for neck-maze");
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let seconds: f64 = stdout
        .lines()
        .find_map(|line| line.strip_prefix("You Win! Time: "))
        .and_then(|time| time.strip_suffix('s'))
        .expect("win banner")
        .parse()
        .expect("numeric time");
    assert!(seconds >= 0.4, "{stdout}");
}
