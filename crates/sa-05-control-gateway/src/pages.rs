//! HTML pages served to browsers.

use sa_03_proposal_quorum::{ControlOutcome, StatusSnapshot};

/// Landing page: whose turn it is, signature progress and links.
pub fn index(status: &StatusSnapshot) -> String {
    let signers = status
        .signer_names
        .iter()
        .map(|name| escape(name))
        .collect::<Vec<_>>()
        .join("<br />");
    format!(
        r#"<html><body>
<h2>It's {turn}'s turn.</h2><br />
<h3>The proposal has {count} of {required} signatures.</h3><br />
<h4>Signed-off by:</h4><br /> {signers} <br /><hr />
<a href="/source">Current Source Code</a><br />
<a href="/submit">Submit A Patch</a><br />
<a href="/proposal">View Proposal</a><br />
<a href="/sign">Signoff Current Proposal</a><br />
<hr />
You can sign code using GPG: <br />
<pre>
$ gpg --clearsign -o signed_code.txt self-amend
</pre>
</body></html>
"#,
        turn = escape(&status.current_turn_name),
        count = status.signature_count_label(),
        required = status.quorum_size,
        signers = signers,
    )
}

/// Upload form posting a signed copy of the proposal.
pub fn sign_form() -> &'static str {
    r#"<html><body>
<form action="/upload/sign" method="post" enctype="multipart/form-data">
  Upload a signed copy of the proposed code to sign off.
  <input type="file" name="upload" /> <br />
  <input type="submit" value="Upload signature" />
</form>
</body></html>
"#
}

/// Upload form posting a signed replacement program.
pub fn submit_form() -> &'static str {
    r#"<html><body>
<form action="/upload/submit" method="post" enctype="multipart/form-data">
  Upload a signed file to replace the running program:
  <input type="file" name="upload" /> <br />
  <input type="submit" value="Upload new code" />
</form>
</body></html>
"#
}

/// Result page for a form upload.
pub fn outcome(outcome: &ControlOutcome) -> String {
    let link = match outcome {
        ControlOutcome::Accepted => r#"<br /><a href="/">Acquire approvals</a>"#,
        ControlOutcome::SignatureApproved => r#"<br /><a href="/">Home</a>"#,
        _ => "",
    };
    format!(
        "<html><body><h1>{}</h1>{}</body></html>",
        escape(&outcome.to_string()),
        link
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_without_proposal() {
        let page = index(&StatusSnapshot {
            current_turn_name: "Ted".into(),
            signature_count: None,
            quorum_size: 2,
            signer_names: vec![],
        });
        assert!(page.contains("It's Ted's turn."));
        assert!(page.contains("none of 2 signatures"));
    }

    #[test]
    fn test_names_are_escaped() {
        let page = index(&StatusSnapshot {
            current_turn_name: "<script>".into(),
            signature_count: Some(1),
            quorum_size: 2,
            signer_names: vec!["A&B".into()],
        });
        assert!(page.contains("&lt;script&gt;"));
        assert!(page.contains("A&amp;B"));
    }

    #[test]
    fn test_outcome_page() {
        let page = outcome(&ControlOutcome::Unauthorized("K2".into()));
        assert_eq!(page, "<html><body><h1>Unauthorized: K2</h1></body></html>");
    }
}
