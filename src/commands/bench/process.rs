use super::*;

const POLL_INTERVAL: Duration = Duration::from_millis(2);
const PIPE_GRACE: Duration = Duration::from_millis(50);
const PIPE_CHUNK_BYTES: usize = 8192;
const FAILED_EXIT_CODE: i32 = -1;
const STDERR_SNIPPET_CHARS: usize = 200;

/// Captured result of one blocking engine process run.
#[derive(Debug, Clone)]
pub(super) struct EngineInvocation {
    pub(super) exit_code: i32,
    pub(super) stdout: String,
    pub(super) stderr: String,
    pub(super) elapsed_ms: f64,
    pub(super) timed_out: bool,
}

/// Runs `program` to completion or until `timeout` elapses. Spawn failures
/// and timeouts are folded into the returned invocation rather than
/// propagated, so one bad run never stops a benchmark.
pub(super) fn run_engine_command(
    program: &str,
    args: &[String],
    timeout: Duration,
) -> EngineInvocation {
    let started = Instant::now();
    match spawn_and_wait(program, args, timeout, started) {
        Ok(invocation) => invocation,
        Err(err) => {
            warn!(program, error = %err, "engine invocation failed");
            EngineInvocation {
                exit_code: FAILED_EXIT_CODE,
                stdout: String::new(),
                stderr: format!("{err:#}"),
                elapsed_ms: elapsed_ms(started),
                timed_out: false,
            }
        }
    }
}

fn spawn_and_wait(
    program: &str,
    args: &[String],
    timeout: Duration,
    started: Instant,
) -> Result<EngineInvocation> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn {program}"))?;

    let stdout_reader = drain_pipe(child.stdout.take());
    let stderr_reader = drain_pipe(child.stderr.take());

    let status = loop {
        if let Some(status) = child
            .try_wait()
            .with_context(|| format!("failed to poll {program}"))?
        {
            break Some(status);
        }
        if started.elapsed() >= timeout {
            if let Err(err) = child.kill() {
                debug!(program, error = %err, "failed to kill timed-out engine");
            }
            child
                .wait()
                .with_context(|| format!("failed to reap timed-out {program}"))?;
            break None;
        }
        thread::sleep(POLL_INTERVAL);
    };

    // Descendants may still hold the pipes open after the child is gone.
    let grace_deadline = Instant::now() + PIPE_GRACE;
    let pipe_deadline = started
        .checked_add(timeout)
        .map_or(grace_deadline, |deadline| deadline.max(grace_deadline));
    let stdout = collect_pipe(stdout_reader, pipe_deadline);
    let stderr = collect_pipe(stderr_reader, pipe_deadline);
    let elapsed = elapsed_ms(started);

    let invocation = match status {
        Some(status) => EngineInvocation {
            exit_code: status.code().unwrap_or(FAILED_EXIT_CODE),
            stdout,
            stderr,
            elapsed_ms: elapsed,
            timed_out: false,
        },
        None => {
            let notice = format!("timed out after {} ms", timeout.as_millis());
            warn!(program, timeout_ms = timeout.as_millis() as u64, "engine timed out");
            EngineInvocation {
                exit_code: FAILED_EXIT_CODE,
                stdout,
                stderr: if stderr.trim().is_empty() {
                    notice
                } else {
                    format!("{notice}; {}", stderr.trim())
                },
                elapsed_ms: elapsed,
                timed_out: true,
            }
        }
    };
    Ok(invocation)
}

fn drain_pipe<R>(pipe: Option<R>) -> Option<Receiver<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    pipe.map(|mut reader| {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = [0_u8; PIPE_CHUNK_BYTES];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => break,
                    Ok(count) => {
                        if sender.send(buf[..count].to_vec()).is_err() {
                            break;
                        }
                    }
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    Err(err) => {
                        debug!(error = %err, "engine pipe closed early");
                        break;
                    }
                }
            }
        });
        receiver
    })
}

/// Gathers pipe output until the writer side closes or `deadline` passes.
/// Output still pending at the deadline is abandoned along with its reader.
fn collect_pipe(receiver: Option<Receiver<Vec<u8>>>, deadline: Instant) -> String {
    let Some(receiver) = receiver else {
        return String::new();
    };

    let mut buf = Vec::new();
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match receiver.recv_timeout(remaining) {
            Ok(chunk) => buf.extend_from_slice(&chunk),
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                debug!("engine pipe still open at deadline, abandoning reader");
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

/// Single-line, length-capped view of an engine's stderr for the report.
pub(super) fn stderr_snippet(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|character| match character {
            '\n' | '\r' => ' ',
            other => other,
        })
        .take(STDERR_SNIPPET_CHARS)
        .collect()
}
