//! Tests for the observation context tracker.

#[cfg(test)]
mod tests {
    use crate::config::{ObservationConfig, DEFAULT_LISTENER_NAME};
    use crate::context::{Execution, ExecutionContext};
    use crate::event::{BeginEvent, Event, EventDescriptor, EventFilter, EventMatcher};
    use crate::listener::EventListener;
    use crate::tracker::ObservationContext;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use std::io;
    use std::sync::Arc;

    /// Shared in-memory sink for formatted log records.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn lines(&self) -> Vec<String> {
            String::from_utf8_lossy(&self.0.lock())
                .lines()
                .map(String::from)
                .collect()
        }
    }

    /// Runs `f` under a subscriber recording ERROR records, returning them.
    fn capture_errors(f: impl FnOnce()) -> Vec<String> {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::ERROR)
            .finish();

        tracing::subscriber::with_default(subscriber, f);
        logs.lines()
    }

    fn dispatch(tracker: &ObservationContext, ctx: Option<&ExecutionContext>, event: Event) {
        tracker.on_event(ctx, &event, None, None);
    }

    #[test]
    fn test_begin_then_is_in() {
        let tracker = ObservationContext::new();
        let ctx = ExecutionContext::new();

        dispatch(&tracker, Some(&ctx), Event::begin("job.run"));
        assert!(tracker.is_in(Some(&ctx), &BeginEvent::new("job.run")));

        dispatch(&tracker, Some(&ctx), Event::end("job.run"));
        assert!(!tracker.is_in(Some(&ctx), &BeginEvent::new("job.run")));
    }

    #[test]
    fn test_nesting() {
        let tracker = ObservationContext::new();
        let ctx = ExecutionContext::new();
        let a = BeginEvent::new("document.save");
        let b = BeginEvent::new("job.run");

        dispatch(&tracker, Some(&ctx), a.clone().into());
        dispatch(&tracker, Some(&ctx), b.clone().into());
        assert!(tracker.is_in(Some(&ctx), &a));
        assert!(tracker.is_in(Some(&ctx), &b));

        dispatch(&tracker, Some(&ctx), Event::end("job.run"));
        assert!(tracker.is_in(Some(&ctx), &a));
        assert!(!tracker.is_in(Some(&ctx), &b));

        dispatch(&tracker, Some(&ctx), Event::end("document.save"));
        assert!(!tracker.is_in(Some(&ctx), &a));
        assert!(!tracker.is_in(Some(&ctx), &b));
        assert_eq!(ctx.event_depth(), 0);
    }

    #[test]
    fn test_pattern_filter() {
        let tracker = ObservationContext::new();
        let ctx = ExecutionContext::new();

        dispatch(&tracker, Some(&ctx), BeginEvent::named("job.run", "install").into());

        assert!(tracker.is_in(Some(&ctx), &BeginEvent::new("job.run")));
        assert!(tracker.is_in(Some(&ctx), &BeginEvent::named("job.run", "install")));
        assert!(!tracker.is_in(Some(&ctx), &BeginEvent::named("job.run", "uninstall")));
        assert!(!tracker.is_in(Some(&ctx), &BeginEvent::new("job.stop")));
    }

    #[test]
    fn test_regex_pattern() {
        let tracker = ObservationContext::new();
        let ctx = ExecutionContext::new();
        dispatch(&tracker, Some(&ctx), BeginEvent::named("document.save", "Main.WebHome").into());

        let pattern = BeginEvent::from(
            EventDescriptor::new("document.save")
                .with_filter(EventFilter::regex("Main\\..*").unwrap()),
        );
        assert!(tracker.is_in(Some(&ctx), &pattern));
    }

    #[test]
    fn test_unbalanced_end_is_counted() {
        let tracker = ObservationContext::new();
        let ctx = ExecutionContext::new();

        dispatch(&tracker, Some(&ctx), Event::end("job.run"));

        assert_eq!(tracker.unbalanced_end_events(), 1);
        assert_eq!(ctx.event_depth(), 0);
        assert!(!ctx.has_event_stack());
    }

    #[test]
    fn test_unbalanced_end_after_drain() {
        let tracker = ObservationContext::new();
        let ctx = ExecutionContext::new();

        dispatch(&tracker, Some(&ctx), Event::begin("job.run"));
        dispatch(&tracker, Some(&ctx), Event::end("job.run"));
        dispatch(&tracker, Some(&ctx), Event::end("job.run"));

        assert_eq!(tracker.unbalanced_end_events(), 1);
        assert_eq!(ctx.event_depth(), 0);

        dispatch(&tracker, Some(&ctx), Event::begin("job.run"));
        assert_eq!(ctx.event_depth(), 1);
    }

    #[test]
    fn test_unbalanced_end_without_logging() {
        let tracker = ObservationContext::with_config(
            ObservationConfig::new().with_unbalanced_end_logging(false),
        );

        dispatch(&tracker, None, Event::end("job.run"));
        assert_eq!(tracker.unbalanced_end_events(), 1);
    }

    #[test]
    fn test_no_context() {
        let tracker = ObservationContext::new();

        dispatch(&tracker, None, Event::begin("job.run"));
        assert!(!tracker.is_in(None, &BeginEvent::new("job.run")));
        assert_eq!(tracker.unbalanced_end_events(), 0);
    }

    #[test]
    fn test_plain_events_ignored() {
        let tracker = ObservationContext::new();
        let ctx = ExecutionContext::new();

        dispatch(&tracker, Some(&ctx), Event::plain("document.update"));
        assert!(!ctx.has_event_stack());

        dispatch(&tracker, Some(&ctx), Event::begin("job.run"));
        dispatch(&tracker, Some(&ctx), Event::plain("document.update"));
        assert_eq!(ctx.open_events(), vec![BeginEvent::new("job.run")]);
    }

    #[test]
    fn test_payloads_are_not_read() {
        let tracker = ObservationContext::new();
        let ctx = ExecutionContext::new();
        let source = serde_json::json!({"component": "installer"});

        tracker.on_event(Some(&ctx), &Event::begin("job.run"), Some(&source), Some(&serde_json::json!(null)));
        assert_eq!(ctx.event_depth(), 1);
    }

    #[test]
    fn test_contexts_are_isolated() {
        let tracker = ObservationContext::new();
        let first = ExecutionContext::new();
        let second = ExecutionContext::new();

        dispatch(&tracker, Some(&first), Event::begin("job.run"));

        assert!(tracker.is_in(Some(&first), &BeginEvent::new("job.run")));
        assert!(!tracker.is_in(Some(&second), &BeginEvent::new("job.run")));
    }

    #[test]
    fn test_is_in_current() {
        let tracker = ObservationContext::new();
        let execution = Execution::new();
        let pattern = BeginEvent::new("job.run");

        assert!(!tracker.is_in_current(&execution, &pattern));

        let ctx = Arc::new(ExecutionContext::new());
        let _guard = execution.enter(ctx.clone());
        dispatch(&tracker, Some(&*ctx), Event::begin("job.run"));
        assert!(tracker.is_in_current(&execution, &pattern));
    }

    #[test]
    fn test_metadata() {
        let tracker = ObservationContext::new();
        assert_eq!(tracker.name(), DEFAULT_LISTENER_NAME);
        assert!(!tracker.name().is_empty());
        assert_eq!(tracker.events(), &[EventMatcher::All]);
    }

    #[test]
    fn test_blank_name_falls_back() {
        let tracker = ObservationContext::with_config(ObservationConfig::new().with_listener_name("  "));
        assert_eq!(tracker.name(), DEFAULT_LISTENER_NAME);

        let named = ObservationContext::with_config(ObservationConfig::new().with_listener_name("nesting"));
        assert_eq!(named.name(), "nesting");
    }

    #[test]
    fn test_accepts_every_event() {
        let tracker = ObservationContext::new();
        assert!(tracker.accepts(&Event::begin("a")));
        assert!(tracker.accepts(&Event::end("b")));
        assert!(tracker.accepts(&Event::plain("c")));
    }

    #[test]
    fn test_unbalanced_end_logs_error() {
        let tracker = ObservationContext::new();
        let ctx = ExecutionContext::new();

        let lines = capture_errors(|| {
            dispatch(&tracker, Some(&ctx), Event::end("job.run"));
        });

        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("ERROR"));
        assert!(lines[0].contains("Can't find any begin event corresponding to [job.run]"));
        assert!(lines[0].contains(&ctx.id().to_string()));
        assert!(lines[0].contains(DEFAULT_LISTENER_NAME));
    }

    #[test]
    fn test_unbalanced_end_without_context_logs_error() {
        let tracker = ObservationContext::new();

        let lines = capture_errors(|| {
            dispatch(&tracker, None, Event::end("document.save"));
        });

        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("ERROR"));
        assert!(lines[0].contains("[document.save]"));
    }

    #[test]
    fn test_balanced_sequence_logs_nothing() {
        let tracker = ObservationContext::new();
        let ctx = ExecutionContext::new();

        let lines = capture_errors(|| {
            dispatch(&tracker, Some(&ctx), Event::begin("job.run"));
            dispatch(&tracker, Some(&ctx), Event::end("job.run"));
            dispatch(&tracker, Some(&ctx), Event::plain("job.progress"));
        });

        assert!(lines.is_empty());
    }

    #[test]
    fn test_disabled_logging_emits_nothing() {
        let tracker = ObservationContext::with_config(
            ObservationConfig::new().with_unbalanced_end_logging(false),
        );
        let ctx = ExecutionContext::new();

        let lines = capture_errors(|| {
            dispatch(&tracker, Some(&ctx), Event::end("job.run"));
            dispatch(&tracker, None, Event::end("job.run"));
        });

        assert!(lines.is_empty());
        assert_eq!(tracker.unbalanced_end_events(), 2);
    }
}
