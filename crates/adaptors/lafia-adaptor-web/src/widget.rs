//! Chat widget page
//!
//! A floating icon opens the panel and the close button hides it again.
//! Send or Enter submits; blank input does nothing. Each pending request owns
//! a typing bubble with its own id, so overlapping requests clean up
//! independently and may answer out of order.

pub const WIDGET_HTML: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Lafia Chat</title>
  <style>
    :root { --primary: #0f766e; --bg: #f8fafc; --bot: #e2e8f0; --text: #1e293b; }
    * { box-sizing: border-box; }
    body { font-family: system-ui, -apple-system, sans-serif; background: var(--bg); color: var(--text); margin: 0; min-height: 100vh; }
    #chatbot-icon {
      position: fixed; right: 24px; bottom: 24px; width: 56px; height: 56px; border-radius: 50%;
      background: var(--primary); color: #fff; border: none; font-size: 26px; cursor: pointer;
      display: flex; align-items: center; justify-content: center; box-shadow: 0 6px 18px rgba(0,0,0,.2);
    }
    #chatbot-container {
      position: fixed; right: 24px; bottom: 24px; width: 340px; height: 480px; background: #fff;
      border-radius: 14px; box-shadow: 0 10px 30px rgba(0,0,0,.2); display: flex; flex-direction: column; overflow: hidden;
    }
    #chatbot-container.hidden { display: none; }
    #chatbot-header { background: var(--primary); color: #fff; padding: 12px 16px; display: flex; justify-content: space-between; align-items: center; }
    #close-btn { background: none; border: none; color: #fff; font-size: 20px; cursor: pointer; }
    #chatbot-messages { flex: 1; overflow-y: auto; padding: 12px; display: flex; flex-direction: column; gap: 8px; }
    .message { max-width: 80%; padding: 8px 12px; border-radius: 12px; white-space: pre-wrap; word-wrap: break-word; }
    .message.user { align-self: flex-end; background: var(--primary); color: #fff; }
    .message.bot { align-self: flex-start; background: var(--bot); }
    .message.typing { font-style: italic; opacity: .7; }
    #chatbot-input-row { display: flex; border-top: 1px solid #e2e8f0; }
    #chatbot-input { flex: 1; border: none; padding: 12px; font-size: 14px; outline: none; }
    #send-btn { border: none; background: var(--primary); color: #fff; padding: 0 16px; cursor: pointer; }
  </style>
</head>
<body>
  <button id="chatbot-icon" aria-label="Open chat">💬</button>
  <div id="chatbot-container" class="hidden">
    <div id="chatbot-header"><span>Lafia Chat</span><button id="close-btn" aria-label="Close chat">&times;</button></div>
    <div id="chatbot-messages"></div>
    <div id="chatbot-input-row">
      <input id="chatbot-input" type="text" placeholder="Type a message..." autocomplete="off">
      <button id="send-btn">Send</button>
    </div>
  </div>
  <script>
    const FALLBACK = "Sorry, I'm having trouble responding. Please try again.";
    let nextTypingId = 0;

    document.addEventListener("DOMContentLoaded", () => {
      const container = document.getElementById("chatbot-container");
      const icon = document.getElementById("chatbot-icon");
      const input = document.getElementById("chatbot-input");

      icon.addEventListener("click", () => {
        container.classList.remove("hidden");
        icon.style.display = "none";
        input.focus();
      });
      document.getElementById("close-btn").addEventListener("click", () => {
        container.classList.add("hidden");
        icon.style.display = "flex";
      });
      document.getElementById("send-btn").addEventListener("click", sendMessage);
      input.addEventListener("keypress", (e) => { if (e.key === "Enter") sendMessage(); });
    });

    function appendMessage(sender, text, id) {
      const box = document.getElementById("chatbot-messages");
      const el = document.createElement("div");
      el.classList.add("message", sender);
      if (id) { el.id = id; el.classList.add("typing"); }
      el.textContent = text;
      box.appendChild(el);
      box.scrollTop = box.scrollHeight;
    }

    function removeMessage(id) {
      const el = document.getElementById(id);
      if (el) el.remove();
    }

    async function sendMessage() {
      const input = document.getElementById("chatbot-input");
      const text = input.value.trim();
      if (!text) return;
      appendMessage("user", text);
      input.value = "";

      const typingId = "typing-" + (nextTypingId++);
      appendMessage("bot", "…", typingId);
      let reply = FALLBACK;
      try {
        const res = await fetch("api/chat", {
          method: "POST",
          headers: { "Content-Type": "application/json" },
          body: JSON.stringify({ text }),
        });
        if (res.ok && res.status !== 204) {
          const data = await res.json();
          if (typeof data.reply === "string") reply = data.reply;
        }
      } catch (err) {
        console.error("chat request failed", err);
      }
      removeMessage(typingId);
      appendMessage("bot", reply);
    }
  </script>
</body>
</html>
"##;
