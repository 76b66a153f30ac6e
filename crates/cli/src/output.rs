use hickory_proto::op::Message;
use hickory_proto::rr::Record;
use nsquery_domain::Reply;
use std::fmt::Write;

/// Renders a reply the way stub-resolver tools print one: header, sections,
/// then the annotation trailer.
pub fn render(reply: &Reply<Message>) -> String {
    let message = &reply.message;
    let mut out = String::new();

    let _ = writeln!(
        out,
        ";; ->>HEADER<<- rcode: {}, id: {}",
        message.response_code(),
        message.id()
    );
    let _ = writeln!(
        out,
        ";; QUERY: {}, ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}",
        message.queries().len(),
        message.answers().len(),
        message.name_servers().len(),
        message.additionals().len()
    );
    if message.truncated() {
        let _ = writeln!(out, ";; WARNING: reply truncated, retry over TCP");
    }

    let _ = writeln!(out, ";; QUESTION SECTION:");
    for query in message.queries() {
        let _ = writeln!(out, ";; {}", query);
    }

    render_section(&mut out, "ANSWER", message.answers());
    render_section(&mut out, "AUTHORITY", message.name_servers());
    render_section(&mut out, "ADDITIONAL", message.additionals());

    out.push('\n');
    out.push_str(&render_trailer(reply));
    out
}

fn render_section(out: &mut String, title: &str, records: &[Record]) {
    let _ = writeln!(out, "\n;; {} SECTION:", title);
    for record in records {
        let _ = writeln!(out, "{}", record);
    }
}

pub fn render_trailer<M>(reply: &Reply<M>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, ";; Query time: {} msec", reply.query_time_ms);
    let _ = writeln!(
        out,
        ";; SERVER: {} ({})",
        reply.answer_from, reply.protocol
    );
    let _ = writeln!(out, ";; WHEN: {}", reply.when_display());
    let _ = writeln!(out, ";; MSG SIZE  rcvd: {}", reply.size);
    if reply.tsig_failed() {
        let _ = writeln!(out, ";; TSIG: verification failed");
    }
    out
}
