//! The single-page UI served at `/`.

pub const INDEX_HTML: &str = r##"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Sehat GPT</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; color: #1f2933; }
  h1 { margin-bottom: 0.25rem; }
  .lede { color: #52606d; margin-top: 0; }
  .panes { display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }
  label { display: block; font-weight: 600; margin: 1rem 0 0.35rem; }
  select, textarea, button { width: 100%; font: inherit; }
  textarea { min-height: 22rem; padding: 0.6rem; resize: vertical; }
  button { margin-top: 1rem; padding: 0.6rem; background: #2f855a; color: #fff; border: 0; border-radius: 4px; cursor: pointer; }
  button:disabled { background: #9fb3a8; cursor: wait; }
  #preview { max-width: 100%; max-height: 18rem; margin-top: 0.5rem; display: none; }
  #gallery { display: flex; flex-wrap: wrap; gap: 0.5rem; margin-top: 1.5rem; }
  #gallery img { width: 72px; height: 72px; object-fit: cover; cursor: pointer; border-radius: 4px; border: 1px solid #cbd2d9; }
  @media (max-width: 720px) { .panes { grid-template-columns: 1fr; } }
</style>
</head>
<body>
<h1>Sehat GPT</h1>
<p class="lede">Your AI nutritionist. Upload a picture of a product label, food item, or menu
for a plain-language nutrition summary. Calorie figures are generic estimates and may vary.</p>

<div class="panes">
  <form id="form">
    <label for="image">Upload a picture of a product label, food item, or menu</label>
    <input id="image" name="image" type="file" accept="image/*">
    <img id="preview" alt="">
    <label for="model">Select Model</label>
    <select id="model" name="model"></select>
    <button id="submit" type="submit">Analyze</button>
  </form>
  <div>
    <label for="output">Analysis</label>
    <textarea id="output" readonly></textarea>
  </div>
</div>

<div id="gallery"></div>

<script>
const form = document.getElementById("form");
const fileInput = document.getElementById("image");
const preview = document.getElementById("preview");
const modelSelect = document.getElementById("model");
const output = document.getElementById("output");
const submit = document.getElementById("submit");
let defaultModel = "";

fileInput.addEventListener("change", () => {
  const file = fileInput.files[0];
  if (file) {
    preview.src = URL.createObjectURL(file);
    preview.style.display = "block";
  } else {
    preview.style.display = "none";
  }
});

async function send(file, model) {
  const body = new FormData();
  if (file) body.append("image", file);
  body.append("model", model);
  submit.disabled = true;
  output.value = "Analyzing...";
  try {
    const resp = await fetch("/api/analyze", { method: "POST", body });
    const data = await resp.json();
    output.value = resp.ok ? data.text : "Error: " + data.error;
  } catch (err) {
    output.value = "Error: " + err;
  } finally {
    submit.disabled = false;
  }
}

form.addEventListener("submit", (event) => {
  event.preventDefault();
  send(fileInput.files[0], modelSelect.value);
});

async function loadModels() {
  const data = await (await fetch("/api/models")).json();
  defaultModel = data.default;
  for (const model of data.models) {
    const option = document.createElement("option");
    option.value = model;
    option.textContent = model;
    option.selected = model === data.default;
    modelSelect.appendChild(option);
  }
}

async function loadExamples() {
  const data = await (await fetch("/api/examples")).json();
  const gallery = document.getElementById("gallery");
  for (const name of data.examples) {
    const url = "/examples/" + encodeURIComponent(name);
    const img = document.createElement("img");
    img.src = url;
    img.alt = name;
    img.title = name;
    img.addEventListener("click", async () => {
      const blob = await (await fetch(url)).blob();
      preview.src = url;
      preview.style.display = "block";
      modelSelect.value = defaultModel;
      send(new File([blob], name, { type: blob.type }), defaultModel);
    });
    gallery.appendChild(img);
  }
}

loadModels().then(loadExamples);
</script>
</body>
</html>
"##;
