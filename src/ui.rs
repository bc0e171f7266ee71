use crate::models::CountdownResponse;

pub fn render_index(snapshot: &CountdownResponse) -> String {
    INDEX_HTML
        .replace("{{TITLE}}", &escape_html(&snapshot.title))
        .replace("{{COUNTDOWN}}", &escape_html(&snapshot.text))
        .replace("{{NAME}}", &escape_html(&snapshot.name))
        .replace("{{DATE}}", &escape_html(&snapshot.date))
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Countdown</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef3f8;
      --bg-2: #c9dcf0;
      --ink: #1f2a36;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e4ecf6 60%, #f4f7fb 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    .title-box {
      padding: 0 8px;
      overflow: hidden;
    }

    #title {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      margin: 0;
      line-height: 1.1;
      visibility: hidden;
    }

    .countdown {
      font-size: clamp(1.3rem, 3vw, 2rem);
      font-weight: 600;
      color: var(--accent-2);
      min-height: 1.4em;
      margin: 0;
    }

    form.edit {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 16px;
    }

    label {
      display: grid;
      gap: 8px;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #7d8793;
    }

    input {
      font: inherit;
      font-size: 1rem;
      text-transform: none;
      letter-spacing: normal;
      color: var(--ink);
      padding: 12px 14px;
      border-radius: 14px;
      border: 1px solid rgba(47, 72, 88, 0.16);
      background: white;
    }

    .quote {
      background: white;
      border-radius: 20px;
      padding: 20px 22px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      min-height: 4em;
    }

    .quote blockquote {
      margin: 0;
      font-style: italic;
      font-size: 1.05rem;
    }

    .quote[data-state="loading"] {
      color: #8b939c;
    }

    .quote[data-state="error"] {
      color: #c63b2b;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    noscript button {
      margin-top: 12px;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header class="title-box">
      <h1 id="title">{{TITLE}}</h1>
    </header>

    <p class="countdown" id="countdown">{{COUNTDOWN}}</p>

    <form class="edit" id="edit-form" method="post" action="/event">
      <label>
        Event
        <input id="event-name" name="name" type="text" value="{{NAME}}" autocomplete="off" />
      </label>
      <label>
        Date
        <input id="event-date" name="date" type="date" value="{{DATE}}" />
      </label>
      <noscript><button type="submit">Save</button></noscript>
    </form>

    <section class="quote" id="quote" data-state="loading" aria-live="polite">
      <p id="quote-loading">Loading a quote...</p>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const MIN_FONT_SIZE = 10;
    const titleEl = document.getElementById('title');
    const countdownEl = document.getElementById('countdown');
    const nameEl = document.getElementById('event-name');
    const dateEl = document.getElementById('event-date');
    const quoteEl = document.getElementById('quote');
    const statusEl = document.getElementById('status');
    const formEl = document.getElementById('edit-form');

    const teardown = [];

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    // Title fitting. The server runs the size search; the page reports geometry.
    let fitReady = false;
    let fitSeq = 0;

    const fitTitle = async () => {
      const parent = titleEl.parentElement;
      if (!parent) {
        return;
      }
      const styles = window.getComputedStyle(parent);
      const body = {
        text: titleEl.textContent,
        client_width: parent.clientWidth,
        padding_left: parseFloat(styles.paddingLeft) || 0,
        padding_right: parseFloat(styles.paddingRight) || 0
      };
      if (body.client_width - body.padding_left - body.padding_right <= 0) {
        return;
      }

      const seq = ++fitSeq;
      const res = await fetch('/api/fit', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      });
      if (!res.ok || seq !== fitSeq) {
        return;
      }
      const outcome = await res.json();
      if (outcome.font_size === null || seq !== fitSeq) {
        return;
      }
      Object.assign(titleEl.style, {
        whiteSpace: 'nowrap',
        display: 'block',
        width: '100%',
        fontSize: `${Math.max(outcome.font_size, MIN_FONT_SIZE)}px`,
        visibility: 'visible'
      });
    };

    const refit = () => {
      fitTitle().catch(() => {});
    };

    const setupFit = () => {
      const parent = titleEl.parentElement;
      if (!parent) {
        return;
      }
      if ('ResizeObserver' in window) {
        const observer = new ResizeObserver(refit);
        observer.observe(parent);
        teardown.push(() => observer.disconnect());
      }
      window.addEventListener('resize', refit);
      teardown.push(() => window.removeEventListener('resize', refit));
      fitReady = true;
      refit();
    };

    const setTitle = (title) => {
      if (titleEl.textContent === title) {
        return;
      }
      titleEl.textContent = title;
      if (fitReady) {
        refit();
      }
    };

    requestAnimationFrame(() => setTimeout(setupFit, 50));

    // Countdown stream.
    const stream = new EventSource('/api/countdown/stream');
    stream.addEventListener('countdown', (message) => {
      const snapshot = JSON.parse(message.data);
      countdownEl.textContent = snapshot.text;
      setTitle(snapshot.title);
    });
    teardown.push(() => stream.close());

    // Event edits are saved as they happen.
    const saveEvent = async (update) => {
      const res = await fetch('/api/event', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(update)
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Unable to save event');
      }
      const event = await res.json();
      setTitle(`Time to ${event.name}`);
      setStatus('', '');
    };

    nameEl.addEventListener('input', () => {
      saveEvent({ name: nameEl.value }).catch((err) => setStatus(err.message, 'error'));
    });
    dateEl.addEventListener('change', () => {
      saveEvent({ date: dateEl.value }).catch((err) => setStatus(err.message, 'error'));
    });
    formEl.addEventListener('submit', (event) => {
      event.preventDefault();
    });

    // One quote per page life.
    const quoteAbort = new AbortController();
    teardown.push(() => quoteAbort.abort());

    const renderQuote = (panel) => {
      quoteEl.dataset.state = panel.state;
      quoteEl.replaceChildren();
      if (panel.state === 'loaded') {
        const block = document.createElement('blockquote');
        block.textContent = panel.text;
        quoteEl.appendChild(block);
      } else {
        const note = document.createElement('p');
        note.textContent = 'Could not load a quote.';
        quoteEl.appendChild(note);
      }
    };

    fetch('/api/quote', { signal: quoteAbort.signal })
      .then((res) => (res.ok ? res.json() : { state: 'error' }))
      .then(renderQuote)
      .catch((err) => {
        if (err.name !== 'AbortError') {
          renderQuote({ state: 'error' });
        }
      });

    window.addEventListener('pagehide', () => {
      fitSeq += 1;
      teardown.splice(0).forEach((release) => release());
    });
  </script>
</body>
</html>
"#;
