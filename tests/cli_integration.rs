//! CLI integration tests
//!
//! Tests the command-line interface end-to-end.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Get path to the stowbox binary
fn stowbox_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove deps/
    path.push("stowbox");
    path
}

/// Run stowbox with the key supplied on stdin
fn run_stowbox_with_key(
    args: &[&str],
    key: &str,
) -> Result<std::process::Output, std::io::Error> {
    let mut child = Command::new(stowbox_bin())
        .arg("--key-stdin")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    {
        let stdin = child.stdin.as_mut().expect("failed to open stdin");
        // Ignore BrokenPipe errors - the command may exit before reading stdin
        // if it encounters an error (e.g., file not found)
        let _ = stdin.write_all(key.as_bytes());
    }

    child.wait_with_output()
}

#[test]
fn test_hide_reveal_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let host = temp_dir.path().join("photo.jpg");
    let encoded = temp_dir.path().join("photo-encoded.jpg");

    fs::write(&host, b"\xFF\xD8\xFF\xE0 fake jpeg bytes {with braces}").unwrap();

    let result = run_stowbox_with_key(
        &[
            "hide",
            "-i",
            host.to_str().unwrap(),
            "-o",
            encoded.to_str().unwrap(),
            "-m",
            "meet at noon",
        ],
        "k1",
    )
    .unwrap();
    assert!(
        result.status.success(),
        "hide failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    // Host bytes must be preserved as a prefix of the encoded file.
    let encoded_bytes = fs::read(&encoded).unwrap();
    assert!(encoded_bytes.starts_with(b"\xFF\xD8\xFF\xE0 fake jpeg bytes {with braces}"));

    let result = run_stowbox_with_key(&["reveal", "-i", encoded.to_str().unwrap()], "k1").unwrap();
    assert!(
        result.status.success(),
        "reveal failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&result.stdout), "meet at noon\n");
}

#[test]
fn test_reveal_to_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let host = temp_dir.path().join("host.bin");
    let encoded = temp_dir.path().join("encoded.bin");
    let recovered = temp_dir.path().join("message.txt");

    fs::write(&host, b"carrier").unwrap();

    let result = run_stowbox_with_key(
        &[
            "hide",
            "-i",
            host.to_str().unwrap(),
            "-o",
            encoded.to_str().unwrap(),
            "-m",
            "written to a file",
        ],
        "abc123",
    )
    .unwrap();
    assert!(result.status.success());

    let result = run_stowbox_with_key(
        &[
            "reveal",
            "-i",
            encoded.to_str().unwrap(),
            "-o",
            recovered.to_str().unwrap(),
        ],
        "abc123",
    )
    .unwrap();
    assert!(
        result.status.success(),
        "reveal failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    assert_eq!(fs::read_to_string(&recovered).unwrap(), "written to a file");
}

#[test]
fn test_reveal_with_wrong_key_fails() {
    let temp_dir = TempDir::new().unwrap();
    let host = temp_dir.path().join("host.bin");
    let encoded = temp_dir.path().join("encoded.bin");

    fs::write(&host, b"carrier").unwrap();

    let result = run_stowbox_with_key(
        &[
            "hide",
            "-i",
            host.to_str().unwrap(),
            "-o",
            encoded.to_str().unwrap(),
            "-m",
            "secret",
        ],
        "k1",
    )
    .unwrap();
    assert!(result.status.success());

    let result = run_stowbox_with_key(&["reveal", "-i", encoded.to_str().unwrap()], "k2").unwrap();
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(
        stderr.contains("reveal") || stderr.contains("key"),
        "Expected error message about revealing/key, got: {}",
        stderr
    );
}

#[test]
fn test_reveal_unencoded_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let plain = temp_dir.path().join("plain.bin");

    fs::write(&plain, b"no record in here, not even {braces} help").unwrap();

    let result = run_stowbox_with_key(&["reveal", "-i", plain.to_str().unwrap()], "k1").unwrap();
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(
        stderr.contains("reveal") || stderr.contains("record"),
        "Expected error message about a missing record, got: {}",
        stderr
    );
}

#[test]
fn test_hide_with_invalid_key_fails() {
    let temp_dir = TempDir::new().unwrap();
    let host = temp_dir.path().join("host.bin");
    let encoded = temp_dir.path().join("encoded.bin");

    fs::write(&host, b"carrier").unwrap();

    let result = run_stowbox_with_key(
        &[
            "hide",
            "-i",
            host.to_str().unwrap(),
            "-o",
            encoded.to_str().unwrap(),
            "-m",
            "secret",
        ],
        "toolongkey123",
    )
    .unwrap();
    assert!(!result.status.success());
    assert!(!encoded.exists());
}

#[test]
fn test_hide_nonexistent_carrier_fails() {
    let temp_dir = TempDir::new().unwrap();
    let encoded = temp_dir.path().join("encoded.bin");

    let result = run_stowbox_with_key(
        &[
            "hide",
            "-i",
            temp_dir.path().join("nope.bin").to_str().unwrap(),
            "-o",
            encoded.to_str().unwrap(),
            "-m",
            "secret",
        ],
        "k1",
    )
    .unwrap();
    assert!(!result.status.success());
    assert!(!encoded.exists());
}

#[test]
fn test_binary_carrier_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let host = temp_dir.path().join("noise.bin");
    let encoded = temp_dir.path().join("noise-encoded.bin");

    // All byte values, repeated; includes trailer-like and JSON-like bytes.
    let mut carrier: Vec<u8> = (0..=255u8).cycle().take(64 * 1024).collect();
    carrier.extend_from_slice(b"stowbox1");
    carrier.extend_from_slice(br#"{"message":"decoy","keyHash":"0"}"#);
    fs::write(&host, &carrier).unwrap();

    let result = run_stowbox_with_key(
        &[
            "hide",
            "-i",
            host.to_str().unwrap(),
            "-o",
            encoded.to_str().unwrap(),
            "-m",
            "buried in noise",
        ],
        "Zz9",
    )
    .unwrap();
    assert!(
        result.status.success(),
        "hide failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let encoded_bytes = fs::read(&encoded).unwrap();
    assert!(encoded_bytes.starts_with(&carrier[..]));

    let result = run_stowbox_with_key(&["reveal", "-i", encoded.to_str().unwrap()], "Zz9").unwrap();
    assert!(result.status.success());
    assert_eq!(String::from_utf8_lossy(&result.stdout), "buried in noise\n");
}

#[test]
fn test_unicode_message_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let host = temp_dir.path().join("host.bin");
    let encoded = temp_dir.path().join("encoded.bin");

    fs::write(&host, b"carrier").unwrap();

    let message = "caf\u{e9} \u{1f980} r\u{fc}ckw\u{e4}rts";
    let result = run_stowbox_with_key(
        &[
            "hide",
            "-i",
            host.to_str().unwrap(),
            "-o",
            encoded.to_str().unwrap(),
            "-m",
            message,
        ],
        "k1",
    )
    .unwrap();
    assert!(result.status.success());

    let result = run_stowbox_with_key(&["reveal", "-i", encoded.to_str().unwrap()], "k1").unwrap();
    assert!(result.status.success());
    assert_eq!(
        String::from_utf8_lossy(&result.stdout),
        format!("{}\n", message)
    );
}
