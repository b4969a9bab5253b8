//! End-to-end tests against the compiled binary, driven the way rsyslog
//! drives it: one line in, wait for one line out.

use std::{
    io::{BufRead, BufReader, Write},
    process::{Child, ChildStdin, ChildStdout, Command, Stdio},
};

const BIN: &str = env!("CARGO_BIN_EXE_anon-email");

struct Plugin {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
}

impl Plugin {
    fn spawn(args: &[&str]) -> Self {
        Self::spawn_with_env(args, &[])
    }

    fn spawn_with_env(args: &[&str], env: &[(&str, &str)]) -> Self {
        let mut command = Command::new(BIN);
        command
            .args(args)
            .env_remove("RUST_LOG")
            .env_remove("ANON_EMAIL_LOCAL_PREFIX")
            .env_remove("ANON_EMAIL_LOCAL_SUFFIX")
            .env_remove("ANON_EMAIL_DOMAIN_PREFIX")
            .env_remove("ANON_EMAIL_DOMAIN_SUFFIX")
            .env_remove("ANON_EMAIL_MASK_CHAR")
            .envs(env.iter().copied())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        let mut child = command.spawn().unwrap();
        let stdin = child.stdin.take();
        let stdout = BufReader::new(child.stdout.take().unwrap());
        Self {
            child,
            stdin,
            stdout,
        }
    }

    /// Sends one request and blocks for its reply, like the host does.
    fn request(&mut self, line: &str) -> String {
        let stdin = self.stdin.as_mut().unwrap();
        stdin.write_all(line.as_bytes()).unwrap();
        stdin.write_all(b"\n").unwrap();
        stdin.flush().unwrap();

        let mut reply = String::new();
        self.stdout.read_line(&mut reply).unwrap();
        assert!(reply.ends_with('\n'), "reply must be a full line: {reply:?}");
        reply.pop();
        reply
    }

    /// Closes the host side and returns the exit status and any trailing output.
    fn close(mut self) -> (bool, String) {
        drop(self.stdin.take());
        let mut rest = String::new();
        while self.stdout.read_line(&mut rest).unwrap() > 0 {}
        let status = self.child.wait().unwrap();
        (status.success(), rest)
    }
}

mod lockstep {
    use super::*;

    #[test]
    fn replies_arrive_one_per_request() {
        let mut plugin = Plugin::spawn(&[]);
        assert_eq!(plugin.request("nothing here"), "{}");
        assert_eq!(
            plugin.request("login john.doe@example.com ok"),
            r#"{"msg": "login j******e@e******.com ok"}"#
        );
        assert_eq!(plugin.request(""), "{}");

        let (success, rest) = plugin.close();
        assert!(success);
        assert!(rest.is_empty());
    }

    #[test]
    fn immediate_close_exits_cleanly() {
        let plugin = Plugin::spawn(&[]);
        let (success, rest) = plugin.close();
        assert!(success);
        assert!(rest.is_empty());
    }
}

mod startup_values {
    use super::*;

    #[test]
    fn positional_counts_are_applied() {
        let mut plugin = Plugin::spawn(&["2", "0", "0", "3"]);
        assert_eq!(
            plugin.request("alice@mail.org"),
            r#"{"msg": "al***@*****org"}"#
        );
        assert!(plugin.close().0);
    }

    #[test]
    fn bad_counts_fall_back_to_defaults() {
        let mut plugin = Plugin::spawn(&["-5", "abc", "", "x"]);
        assert_eq!(
            plugin.request("john.doe@example.com"),
            r#"{"msg": "j******e@e******.com"}"#
        );
        assert!(plugin.close().0);
    }

    #[test]
    fn surplus_arguments_do_not_prevent_startup() {
        let mut plugin = Plugin::spawn(&["0", "0", "0", "0", "extra", "--bogus"]);
        assert_eq!(
            plugin.request("ab.cd@ef.gh"),
            r#"{"msg": "*****@*****"}"#
        );
        assert!(plugin.close().0);
    }

    #[test]
    fn environment_fills_missing_positionals() {
        let mut plugin = Plugin::spawn_with_env(
            &["0"],
            &[("ANON_EMAIL_LOCAL_SUFFIX", "0"), ("ANON_EMAIL_MASK_CHAR", "#")],
        );
        assert_eq!(
            plugin.request("john.doe@example.com"),
            r##########"{"msg": "########@e######.com"}"##########
        );
        assert!(plugin.close().0);
    }
}
